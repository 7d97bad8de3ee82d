use std::fmt;

/// Lifecycle of one renderer.
///
/// `Uninitialized → SetUp → Active ⇄ SurfaceLost → TornDown`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Created, `set_up` not yet received.
    Uninitialized,
    /// Host context attached; no surface yet.
    SetUp,
    /// Surface and context are live; frames may be drawn.
    Active,
    /// Surface and context destroyed without teardown (rotation,
    /// backgrounding). Resizes are deferred until the next surface.
    SurfaceLost,
    /// Terminal.
    TornDown,
}

impl LifecycleState {
    pub const ALL: [Self; 5] = [
        Self::Uninitialized,
        Self::SetUp,
        Self::Active,
        Self::SurfaceLost,
        Self::TornDown,
    ];

    /// Outcome of delivering `event` in this state.
    ///
    /// Total over every (state, event) pair.
    pub fn transition(self, event: EventKind) -> Transition {
        use EventKind as E;

        match (self, event) {
            (Self::Uninitialized, E::SetUp) => Transition::Move(Self::SetUp),

            (Self::SetUp, E::SurfaceCreated) => Transition::Move(Self::Active),
            (Self::SetUp, E::TearDown) => Transition::Move(Self::TornDown),
            (Self::SetUp, E::DrawFrame) => Transition::Skip,

            (Self::Active, E::Resize | E::DrawFrame) => Transition::Move(Self::Active),
            (Self::Active, E::SurfaceDestroyed) => Transition::Move(Self::SurfaceLost),
            (Self::Active, E::TearDown) => Transition::Move(Self::TornDown),

            (Self::SurfaceLost, E::SurfaceCreated) => Transition::Move(Self::Active),
            (Self::SurfaceLost, E::Resize) => Transition::Move(Self::SurfaceLost),
            (Self::SurfaceLost, E::TearDown) => Transition::Move(Self::TornDown),
            (Self::SurfaceLost, E::DrawFrame) => Transition::Skip,

            _ => Transition::Illegal,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::TornDown
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::SetUp => "set up",
            Self::Active => "active",
            Self::SurfaceLost => "surface lost",
            Self::TornDown => "torn down",
        })
    }
}

/// Event delivered by a host, without payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    SetUp,
    TearDown,
    SurfaceCreated,
    SurfaceDestroyed,
    Resize,
    DrawFrame,
}

impl EventKind {
    pub const ALL: [Self; 6] = [
        Self::SetUp,
        Self::TearDown,
        Self::SurfaceCreated,
        Self::SurfaceDestroyed,
        Self::Resize,
        Self::DrawFrame,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SetUp => "set_up",
            Self::TearDown => "tear_down",
            Self::SurfaceCreated => "on_surface_created",
            Self::SurfaceDestroyed => "on_surface_destroyed",
            Self::Resize => "resize_surface",
            Self::DrawFrame => "on_draw_frame",
        })
    }
}

/// Outcome of an event in a given state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Legal; the renderer ends up in the given state (possibly unchanged).
    Move(LifecycleState),
    /// A draw request with no surface to draw into; ignored quietly.
    Skip,
    /// Not legal here; dropped and reported.
    Illegal,
}

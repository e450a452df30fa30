/// The three screens, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum View {
    #[default]
    Intake,
    Estimate,
    Analysis,
}

impl View {
    /// `Intake -> Estimate`; no-op elsewhere.
    pub fn proceed(self) -> Self {
        match self {
            Self::Intake => Self::Estimate,
            other => other,
        }
    }

    /// `Estimate -> Analysis`; no-op elsewhere.
    pub fn analyze(self) -> Self {
        match self {
            Self::Estimate => Self::Analysis,
            other => other,
        }
    }

    /// Each view has one fixed predecessor. There is no history stack, so
    /// `Analysis` always returns to `Estimate`.
    pub fn back(self) -> Self {
        match self {
            Self::Intake => Self::Intake,
            Self::Estimate => Self::Intake,
            Self::Analysis => Self::Estimate,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Intake => "Property Intake",
            Self::Estimate => "Renovation Estimate",
            Self::Analysis => "AI Investment Analysis",
        }
    }
}

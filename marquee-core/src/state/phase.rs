//! Animation phases

/// Animation phases, visited strictly in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Text moving one column per scroll delay
    #[default]
    Scrolling,
    /// Brightness ramping toward 0
    FadeOut,
    /// Advance to the next line (single tick)
    ChangeLine,
    /// Brightness ramping back toward the target
    FadeIn,
}

impl Phase {
    /// The only phase reachable from `self`
    pub const fn next(self) -> Self {
        match self {
            Phase::Scrolling => Phase::FadeOut,
            Phase::FadeOut => Phase::ChangeLine,
            Phase::ChangeLine => Phase::FadeIn,
            Phase::FadeIn => Phase::Scrolling,
        }
    }

    /// Check if this phase ramps brightness
    pub const fn is_fading(self) -> bool {
        matches!(self, Phase::FadeOut | Phase::FadeIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let mut phase = Phase::Scrolling;
        let expected = [
            Phase::FadeOut,
            Phase::ChangeLine,
            Phase::FadeIn,
            Phase::Scrolling,
        ];
        for want in expected {
            phase = phase.next();
            assert_eq!(phase, want);
        }
    }

    #[test]
    fn test_fading_phases() {
        assert!(Phase::FadeOut.is_fading());
        assert!(Phase::FadeIn.is_fading());
        assert!(!Phase::Scrolling.is_fading());
        assert!(!Phase::ChangeLine.is_fading());
    }
}

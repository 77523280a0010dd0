//! Line-terminator detection and normalization (component D).

use crate::error::{Result, TranslateError};

/// A line terminator style recognized on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eol {
    Lf,
    Cr,
    CrLf,
}

impl Eol {
    fn as_str(self) -> &'static str {
        match self {
            Eol::Lf => "LF",
            Eol::Cr => "CR",
            Eol::CrLf => "CRLF",
        }
    }
}

/// Running state of the normalizer across one translation call.
///
/// `None` until the first newline is seen; pinned to that newline's style
/// from then on, unless `repair` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct EolState(Option<Eol>);

impl EolState {
    pub fn new() -> Self {
        Self(None)
    }

    /// Record `seen` as the canonical style, or check it against the one
    /// already recorded. Returns an error when `repair` is false and `seen`
    /// disagrees with the previously observed style.
    pub fn observe(&mut self, seen: Eol, repair: bool) -> Result<()> {
        match self.0 {
            None => {
                self.0 = Some(seen);
                Ok(())
            }
            Some(expected) if expected.as_str() == seen.as_str() || repair => Ok(()),
            Some(expected) => Err(TranslateError::inconsistent_eol(expected.as_str(), seen.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_is_recorded() {
        let mut state = EolState::new();
        assert!(state.observe(Eol::Lf, false).is_ok());
        assert_eq!(state.0, Some(Eol::Lf));
    }

    #[test]
    fn mismatch_without_repair_errors() {
        let mut state = EolState::new();
        state.observe(Eol::Lf, false).unwrap();
        let err = state.observe(Eol::CrLf, false).unwrap_err();
        assert!(matches!(err, TranslateError::InconsistentEol { .. }));
    }

    #[test]
    fn mismatch_with_repair_is_tolerated() {
        let mut state = EolState::new();
        state.observe(Eol::Lf, false).unwrap();
        assert!(state.observe(Eol::CrLf, true).is_ok());
        assert!(state.observe(Eol::Cr, true).is_ok());
    }
}

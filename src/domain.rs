use std::path::PathBuf;

pub const NO_C_FILE: &str = "NO_C_FILE";
pub const COMPILATION_ERROR: &str = "COMPILATION_ERROR";
pub const TIMEOUT: &str = "TIMEOUT";
pub const BAD_OUTPUT: &str = "BAD_OUTPUT";
pub const SIMILAR_OUTPUT: &str = "SIMILAR_OUTPUT";
pub const GREAT_JOB: &str = "GREAT_JOB";
pub const RUN_ERROR: &str = "RUN_ERROR";
pub const COMPARATOR_ERROR: &str = "COMPARATOR_ERROR";

/// One student's directory under evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub dir: PathBuf,
}

/// Output-similarity class reported by the comparator.
///
/// The comparator communicates its judgment through its exit status; anything
/// outside 1..=3 has no tier and must be reported as a comparator failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Different,
    Similar,
    Identical,
}

impl Tier {
    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Tier::Different),
            2 => Some(Tier::Similar),
            3 => Some(Tier::Identical),
            _ => None,
        }
    }

    pub fn grade(self) -> u32 {
        match self {
            Tier::Different => 60,
            Tier::Similar => 80,
            Tier::Identical => 100,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Tier::Different => BAD_OUTPUT,
            Tier::Similar => SIMILAR_OUTPUT,
            Tier::Identical => GREAT_JOB,
        }
    }
}

/// Terminal result of one submission's trip through the pipeline.
///
/// Exactly one outcome is produced per submission. Everything except
/// `Classified` grades 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvaluationOutcome {
    NoSource,
    BuildFailed,
    TimedOut,
    Classified(Tier),
    /// The built program could not be started or its I/O redirection could
    /// not be set up.
    RunFailed,
    /// The comparator could not be launched or exited with an unrecognized
    /// code.
    ComparatorFailed,
}

impl EvaluationOutcome {
    pub fn grade(&self) -> u32 {
        match self {
            EvaluationOutcome::Classified(tier) => tier.grade(),
            _ => 0,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            EvaluationOutcome::NoSource => NO_C_FILE,
            EvaluationOutcome::BuildFailed => COMPILATION_ERROR,
            EvaluationOutcome::TimedOut => TIMEOUT,
            EvaluationOutcome::Classified(tier) => tier.reason(),
            EvaluationOutcome::RunFailed => RUN_ERROR,
            EvaluationOutcome::ComparatorFailed => COMPARATOR_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_exit_code() {
        assert_eq!(Tier::from_exit_code(1), Some(Tier::Different));
        assert_eq!(Tier::from_exit_code(2), Some(Tier::Similar));
        assert_eq!(Tier::from_exit_code(3), Some(Tier::Identical));
        assert_eq!(Tier::from_exit_code(0), None);
        assert_eq!(Tier::from_exit_code(4), None);
        assert_eq!(Tier::from_exit_code(-1), None);
    }

    #[test]
    fn test_tier_grades() {
        assert_eq!(Tier::Different.grade(), 60);
        assert_eq!(Tier::Similar.grade(), 80);
        assert_eq!(Tier::Identical.grade(), 100);
    }

    #[test]
    fn test_outcome_grades_and_reasons() {
        assert_eq!(EvaluationOutcome::NoSource.grade(), 0);
        assert_eq!(EvaluationOutcome::NoSource.reason(), NO_C_FILE);
        assert_eq!(EvaluationOutcome::BuildFailed.grade(), 0);
        assert_eq!(EvaluationOutcome::BuildFailed.reason(), COMPILATION_ERROR);
        assert_eq!(EvaluationOutcome::TimedOut.grade(), 0);
        assert_eq!(EvaluationOutcome::TimedOut.reason(), TIMEOUT);
        assert_eq!(EvaluationOutcome::RunFailed.grade(), 0);
        assert_eq!(EvaluationOutcome::RunFailed.reason(), RUN_ERROR);
        assert_eq!(
            EvaluationOutcome::ComparatorFailed.reason(),
            COMPARATOR_ERROR
        );
        assert_eq!(EvaluationOutcome::ComparatorFailed.grade(), 0);

        let classified = EvaluationOutcome::Classified(Tier::Identical);
        assert_eq!(classified.grade(), 100);
        assert_eq!(classified.reason(), GREAT_JOB);
    }
}

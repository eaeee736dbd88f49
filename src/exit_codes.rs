//! Exit code constants for the lintdelta CLI.
//!
//! Reporters must let users distinguish "the tool failed" from "your change
//! introduced issues", so each failure class gets its own code:
//! - 0: Success, no new issues
//! - 1: User error (bad args, bad config)
//! - 2: New lint issues were introduced by the change
//! - 3: Git operation failure (including unusable diff text)
//! - 4: Linter failure (could not run, or unusable report output)

/// Successful execution with zero newly introduced issues.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing linter command, or invalid config.
pub const USER_ERROR: i32 = 1;

/// The change introduced at least one new lint issue.
pub const NEW_ISSUES: i32 = 2;

/// Git operation failure, or diff text that does not parse.
pub const GIT_FAILURE: i32 = 3;

/// Linter invocation failure, or report output that does not parse.
pub const LINT_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, NEW_ISSUES, GIT_FAILURE, LINT_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero_and_new_issues_is_two() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(NEW_ISSUES, 2);
        assert_eq!(GIT_FAILURE, 3);
        assert_eq!(LINT_FAILURE, 4);
    }
}

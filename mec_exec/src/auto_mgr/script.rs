//! # Autonomous script definition

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::mnvr::MotionGoal;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of straight and turn legs in the default script before the final turn.
const DEFAULT_NUM_LEGS: usize = 3;

const DEFAULT_LEG_LENGTH_IN: f64 = 60.0;

const DEFAULT_TURN_DEG: f64 = 90.0;

const DEFAULT_SETTLE_MS: u64 = 100;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// One entry of the autonomous script.
///
/// In a parameter file each entry is a table tagged by `type`, for example:
///
/// ```toml
/// [[script]]
/// type = "Motion"
/// kind = "Straight"
/// target = 60.0
///
/// [[script]]
/// type = "Settle"
/// duration_ms = 100
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScriptEntry {
    /// Run a motion primitive to the given goal.
    Motion(MotionGoal),

    /// Command the drive to stop for one cycle.
    Stop,

    /// Wait without commanding the drive.
    Settle { duration_ms: u64 },
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// The built-in script: three legs of driving 60 inches then turning 90 degrees clockwise, each
/// motion followed by a stop and a short settle, then a final turn.
pub fn default_script() -> Vec<ScriptEntry> {
    let mut script = Vec::with_capacity(DEFAULT_NUM_LEGS * 6 + 1);

    for _ in 0..DEFAULT_NUM_LEGS {
        script.push(ScriptEntry::Motion(MotionGoal::straight(DEFAULT_LEG_LENGTH_IN)));
        script.push(ScriptEntry::Stop);
        script.push(ScriptEntry::Settle { duration_ms: DEFAULT_SETTLE_MS });
        script.push(ScriptEntry::Motion(MotionGoal::turn(DEFAULT_TURN_DEG)));
        script.push(ScriptEntry::Stop);
        script.push(ScriptEntry::Settle { duration_ms: DEFAULT_SETTLE_MS });
    }

    script.push(ScriptEntry::Motion(MotionGoal::turn(DEFAULT_TURN_DEG)));

    script
}

/// Find the first entry of the script which can't be executed, returning its index.
pub fn find_invalid(script: &[ScriptEntry]) -> Option<usize> {
    script.iter().position(|e| match e {
        ScriptEntry::Motion(goal) => !goal.target.is_finite(),
        _ => false,
    })
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::mnvr::MotionKind;

    #[test]
    fn test_default_script() {
        let script = default_script();
        assert_eq!(script.len(), 19);

        let motions: Vec<MotionGoal> = script
            .iter()
            .filter_map(|e| match e {
                ScriptEntry::Motion(g) => Some(*g),
                _ => None,
            })
            .collect();

        assert_eq!(motions.len(), 7);
        assert_eq!(motions.iter().filter(|g| g.kind == MotionKind::Turn).count(), 4);
        assert_eq!(script.last(), Some(&ScriptEntry::Motion(MotionGoal::turn(90.0))));
        assert_eq!(find_invalid(&script), None);
    }

    #[test]
    fn test_find_invalid() {
        let script = vec![
            ScriptEntry::Stop,
            ScriptEntry::Motion(MotionGoal::straight(f64::INFINITY)),
        ];
        assert_eq!(find_invalid(&script), Some(1));
    }

    #[test]
    fn test_script_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            script: Vec<ScriptEntry>,
        }

        let w: Wrapper = util::params::load_str(
            r#"
            [[script]]
            type = "Motion"
            kind = "Straight"
            target = -12.5

            [[script]]
            type = "Stop"

            [[script]]
            type = "Settle"
            duration_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(
            w.script,
            vec![
                ScriptEntry::Motion(MotionGoal::straight(-12.5)),
                ScriptEntry::Stop,
                ScriptEntry::Settle { duration_ms: 250 },
            ]
        );
    }
}

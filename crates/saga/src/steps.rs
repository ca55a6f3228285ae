//! Booking saga step names.
//!
//! The compensation table lives in the orchestrator: each completed
//! forward step maps to the action that undoes it, executed in reverse
//! completion order.
//!
//! | step           | forward call       | compensating action |
//! |----------------|--------------------|---------------------|
//! | `hold_room`    | gateway `hold`     | gateway `release`   |
//! | `confirm_hold` | gateway `confirm`  | none (terminal)     |

/// Step name: place a hold on the room for the requested range.
pub const STEP_HOLD_ROOM: &str = "hold_room";

/// Step name: make the held range permanent.
pub const STEP_CONFIRM_HOLD: &str = "confirm_hold";

use serde::{Deserialize, Serialize};
use sprig_types::ObjectId;

/// What a merge does with one filename.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Leave the current side as it is (including "already absent").
    Keep,
    /// The file changed only on the given side: write and stage its version.
    TakeGiven,
    /// The file is new on the given side only: write and stage it.
    Add,
    /// The given side removed a file the current side left alone.
    Delete,
    /// Both sides changed the file, differently.
    Conflict,
}

/// Classify one filename from its blob id at the split point, the current
/// head, and the given head. `None` means the file is absent on that side;
/// absence counts as a value when deciding whether a side changed.
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> Resolution {
    let changed_in_current = current != split;
    let changed_in_given = given != split;

    match (changed_in_current, changed_in_given) {
        (_, false) => Resolution::Keep,
        (false, true) => match (split, given) {
            (_, None) => Resolution::Delete,
            (None, Some(_)) => Resolution::Add,
            (Some(_), Some(_)) => Resolution::TakeGiven,
        },
        (true, true) if current == given => Resolution::Keep,
        (true, true) => Resolution::Conflict,
    }
}

pub mod state;
pub mod validation;

pub use state::{ActiveTab, DragKind, FormState, Submission};
pub use validation::{validate_file, MAX_FILE_SIZE};

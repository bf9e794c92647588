pub mod model;
pub mod options;
pub mod storage;
pub mod store;
pub mod validator;

pub use model::{Items, Preferences, DEFAULT_HOST, DEFAULT_PORT, HOST, PORT};
pub use options::{FormState, OptionsForm, SaveMessage};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::{fetch, PreferenceStore, SaveOutcome};
pub use validator::{HostValidator, PortValidator, Validator};

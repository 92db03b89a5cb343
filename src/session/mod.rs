pub mod analysis;
pub mod flow;
pub mod photos;
pub mod store;

pub use analysis::{analyze_session, run_analysis, DEFAULT_ANALYSIS_DELAY};
pub use flow::{AnalysisTicket, FlowError, SessionSnapshot, Wizard, WizardStage};
pub use photos::{assemble_photos, read_photo_files, PhotoError, PhotoUpload};
pub use store::{JsonFileStore, MemoryStore, SessionStore, StoreError};

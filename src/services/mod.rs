pub mod pipeline_service;
pub mod translation_service;
pub mod notification_service;

pub use pipeline_service::{DispatchResult, PipelineService};
pub use translation_service::{
    GoogleTranslateBackend, MyMemoryBackend, TranslateBackend, TranslationService, Translator,
};
pub use notification_service::{NotificationService, NotificationSink};

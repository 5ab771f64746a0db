pub mod chat;
pub mod dashboard;
pub mod debug;
pub mod shared;
pub mod upload;

pub use chat::ChatView;
pub use dashboard::DashboardView;
pub use debug::ApiDebugPanel;
pub use upload::UploadView;

//! Tool definitions module.
//!
//! One module per Tavus resource; each tool is a unit type implementing
//! [`ToolHandler`](super::ToolHandler).

pub mod common;
pub mod conversations;
pub mod lipsync;
pub mod personas;
pub mod replicas;
pub mod speech;
pub mod videos;

pub use conversations::{
    CreateConversationTool, DeleteConversationTool, EndConversationTool, GetConversationTool,
    ListConversationsTool,
};
pub use lipsync::{CreateLipsyncTool, GetLipsyncTool, ListLipsyncsTool};
pub use personas::{
    CreatePersonaTool, DeletePersonaTool, GetPersonaTool, ListPersonasTool, PatchPersonaTool,
};
pub use replicas::{
    CreateReplicaTool, DeleteReplicaTool, GetReplicaTool, ListReplicasTool, RenameReplicaTool,
};
pub use speech::{CreateSpeechTool, GetSpeechTool};
pub use videos::{CreateVideoTool, DeleteVideoTool, GetVideoTool, ListVideosTool, RenameVideoTool};

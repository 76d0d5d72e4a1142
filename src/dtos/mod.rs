//! DTOs module - Data Transfer Objects
//!
//! DTOs keep the external (API) representation apart from the entities, and
//! carry the declarative validation rules of the incoming forms.

pub mod banner;
pub mod private_message;
pub mod query;
pub mod topic;
pub mod user;

pub use banner::SetBannerDTO;
pub use private_message::{
    CreatePrivateMessageDTO, DeleteMessagesDTO, DeleteMessagesResultDTO, DraftDTO,
    NewMessagesCountDTO, PrivateMessageDTO, SendMessageDTO,
};
pub use query::UserSearchQuery;
pub use topic::{
    CreatePollDTO, CreateTopicDTO, CreateTopicRecordDTO, PollDTO, PollItemDTO, TopicDTO, VoteDTO,
};
pub use user::{
    CreateUserDTO, EditProfileDTO, LoginDTO, NewUserDTO, ProfileDTO, RestorePasswordDTO, UserDTO,
};

//! Application Layer - Use Cases
//!
//! Every use case takes the caller's account id from the session layer;
//! nothing here trusts an owner supplied by the client.

pub mod add_phone;
pub mod delete_phone;
pub mod ownership;
pub mod search_phones;
pub mod update_phone;

pub use add_phone::{AddPhoneInput, AddPhoneUseCase};
pub use delete_phone::DeletePhoneUseCase;
pub use ownership::OwnershipGuard;
pub use search_phones::SearchPhonesUseCase;
pub use update_phone::{UpdatePhoneInput, UpdatePhoneUseCase};

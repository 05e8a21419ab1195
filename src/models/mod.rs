mod address;
mod birthday;
mod email;
mod name;
mod note;
mod phone;
mod record;

pub use address::Address;
pub use birthday::{Birthday, BIRTHDAY_FORMAT};
pub use email::Email;
pub use name::Name;
pub use note::Note;
pub use phone::Phone;
pub use record::Record;

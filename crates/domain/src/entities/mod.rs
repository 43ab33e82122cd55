//! Domain entities

mod portal;
mod zone;

pub use portal::Portal;
pub use zone::Zone;

pub mod inbound;
pub mod outbound;

pub use inbound::AssociationService;
pub use outbound::*;

mod association;

pub use association::AssociationService;

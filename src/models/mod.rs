pub mod invoice;
pub mod part;
pub mod trip;
pub mod vehicle;

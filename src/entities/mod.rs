pub mod brand;
pub mod sneaker;
pub mod sneaker_link;
pub mod user;

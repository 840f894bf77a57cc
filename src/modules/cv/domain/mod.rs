pub mod drafts;
pub mod entities;
pub mod validation;

use nutype::nutype;

pub const MAX_COLLECTION_NAME_LENGTH: usize = 128;

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_COLLECTION_NAME_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Borrow,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct CollectionName(String);

#[cfg(test)]
mod tests;

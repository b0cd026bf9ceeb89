use super::*;

#[test]
fn collection_name_normal_usage() {
    let name = CollectionName::try_from("books").unwrap();
    assert_eq!(name.as_str(), "books");
    assert_eq!(name.to_string(), "books");
}

#[test]
fn collection_name_is_trimmed() {
    let name = CollectionName::try_from("  books \t").unwrap();
    assert_eq!(name.as_str(), "books");
}

#[test]
fn collection_name_rejects_empty_string() {
    let result = CollectionName::try_from("");
    result.unwrap_err();
}

#[test]
fn collection_name_rejects_whitespace_string() {
    let result = CollectionName::try_from("   ");
    result.unwrap_err();
}

#[test]
fn collection_name_rejects_too_long_string() {
    let long_string = "a".repeat(MAX_COLLECTION_NAME_LENGTH + 1);
    let result = CollectionName::try_from(long_string.as_str());
    result.unwrap_err();
}

#[test]
fn collection_name_ordering() {
    const NAMES: [&str; 4] = ["a", "b", "a-2", "apple"];

    for l in NAMES.iter() {
        for r in NAMES.iter() {
            let name_l = CollectionName::try_from(*l).unwrap();
            let name_r = CollectionName::try_from(*r).unwrap();
            assert_eq!(
                name_l.cmp(&name_r),
                l.cmp(r),
                "Comparing '{}' and '{}'",
                l,
                r
            );
        }
    }
}

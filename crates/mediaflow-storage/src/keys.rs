//! Shared key generation for storage backends.

use uuid::Uuid;

/// Generate a storage key for the given folder and filename.
///
/// `{folder_id}/{filename}` when a folder is given, otherwise just `{filename}`.
pub fn generate_storage_key(folder_id: Option<Uuid>, filename: &str) -> String {
    match folder_id {
        Some(folder_id) => format!("{}/{}", folder_id, filename),
        None => filename.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_with_folder() {
        let folder = Uuid::new_v4();
        assert_eq!(
            generate_storage_key(Some(folder), "cat_0a1b2c3d4e.png"),
            format!("{}/cat_0a1b2c3d4e.png", folder)
        );
    }

    #[test]
    fn test_key_without_folder() {
        assert_eq!(generate_storage_key(None, "notes.txt"), "notes.txt");
    }
}

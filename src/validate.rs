//! Upload validation: filename, extension, size.
//!
//! Runs before any filesystem write. Checks are ordered so the cheapest
//! rejection happens first: no filename, then extension, then byte length.
//! Size is measured by seeking to the end of the stream and restoring the
//! prior position, so validation never consumes the upload.

use crate::gallery::GalleryError;
use crate::naming;
use std::io::{self, Seek, SeekFrom};

/// Extensions accepted for gallery uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Upload size ceiling: 5 MiB.
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Validate an upload, returning its lowercased extension.
///
/// - `filename` absent or blank → [`GalleryError::NoFileProvided`]
/// - extension (case-insensitive) outside [`ALLOWED_EXTENSIONS`] →
///   [`GalleryError::UnsupportedType`]
/// - stream longer than [`MAX_FILE_SIZE`] → [`GalleryError::TooLarge`]
///
/// The stream's read position is unchanged on return.
pub fn validate(filename: Option<&str>, file: &mut impl Seek) -> Result<String, GalleryError> {
    let name = filename
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(GalleryError::NoFileProvided)?;

    let ext = naming::extension(name)
        .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
        .ok_or_else(|| GalleryError::UnsupportedType {
            filename: name.to_string(),
        })?;

    let size = stream_len(file)?;
    if size > MAX_FILE_SIZE {
        return Err(GalleryError::TooLarge {
            size,
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(ext)
}

/// Stream length via seek-to-end, restoring the prior position.
pub fn stream_len(file: &mut impl Seek) -> io::Result<u64> {
    let pos = file.stream_position()?;
    let end = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(pos))?;
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accepts_every_allowed_extension() {
        for ext in ALLOWED_EXTENSIONS {
            let name = format!("photo.{ext}");
            let mut data = Cursor::new(vec![0u8; 16]);
            assert_eq!(validate(Some(&name), &mut data).unwrap(), *ext);
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let mut data = Cursor::new(vec![0u8; 16]);
        assert_eq!(validate(Some("photo.JPG"), &mut data).unwrap(), "jpg");
    }

    #[test]
    fn missing_filename_is_rejected() {
        let mut data = Cursor::new(vec![0u8; 16]);
        assert!(matches!(
            validate(None, &mut data),
            Err(GalleryError::NoFileProvided)
        ));
        assert!(matches!(
            validate(Some("   "), &mut data),
            Err(GalleryError::NoFileProvided)
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut data = Cursor::new(vec![0u8; 16]);
        let err = validate(Some("notes.pdf"), &mut data).unwrap_err();
        assert!(matches!(err, GalleryError::UnsupportedType { .. }));
        // The message names the allowed set
        assert!(err.to_string().contains("png, jpg, jpeg, gif, webp"));
    }

    #[test]
    fn no_extension_is_rejected() {
        let mut data = Cursor::new(vec![0u8; 16]);
        assert!(matches!(
            validate(Some("photo"), &mut data),
            Err(GalleryError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut data = Cursor::new(vec![0u8; (MAX_FILE_SIZE + 1) as usize]);
        let err = validate(Some("big.jpg"), &mut data).unwrap_err();
        match err {
            GalleryError::TooLarge { size, limit } => {
                assert_eq!(size, MAX_FILE_SIZE + 1);
                assert_eq!(limit, MAX_FILE_SIZE);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn file_at_exact_limit_is_accepted() {
        let mut data = Cursor::new(vec![0u8; MAX_FILE_SIZE as usize]);
        assert!(validate(Some("edge.png"), &mut data).is_ok());
    }

    #[test]
    fn read_position_is_restored() {
        let mut data = Cursor::new(vec![0u8; 100]);
        data.set_position(7);
        validate(Some("photo.gif"), &mut data).unwrap();
        assert_eq!(data.position(), 7);
    }

    #[test]
    fn stream_len_measures_without_moving() {
        let mut data = Cursor::new(b"hello".to_vec());
        data.set_position(2);
        assert_eq!(stream_len(&mut data).unwrap(), 5);
        assert_eq!(data.position(), 2);
    }
}

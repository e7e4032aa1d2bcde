use chrono::{Datelike, Utc};
use validator::ValidationError;

/// Earliest year accepted for `year_founded` / `year_released`.
pub const CATALOG_YEAR_FLOOR: i32 = 1900;

/// Maximum accepted image payload size.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Image formats accepted for sneaker photos, by file extension.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Validates a catalog year field against `[1900, current year]`.
///
/// Used for both `Brand::year_founded` and `Sneaker::year_released`.
pub fn validate_catalog_year(year: i32) -> Result<(), ValidationError> {
    let max = current_year();
    if year < CATALOG_YEAR_FLOOR || year > max {
        let mut err = ValidationError::new("year_out_of_range");
        err.message = Some(format!("Year must be between {} and {}", CATALOG_YEAR_FLOOR, max).into());
        return Err(err);
    }
    Ok(())
}

/// Validates that an uploaded file name carries a PNG or JPEG extension.
pub fn validate_image_filename(filename: &str) -> Result<(), ValidationError> {
    let extension = filename.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    if filename.contains('.') && ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(());
    }
    let mut err = ValidationError::new("unsupported_image_type");
    err.message = Some("File must be a PNG or JPG".into());
    Err(err)
}

/// Validates that a decoded image payload is within the 2 MB limit.
pub fn validate_image_size(size: usize) -> Result<(), ValidationError> {
    if size > MAX_IMAGE_BYTES {
        let mut err = ValidationError::new("image_too_large");
        err.message = Some(format!("Filesize exceeds limit of {}MB", MAX_IMAGE_BYTES / (1024 * 1024)).into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_below_floor_is_rejected() {
        assert!(validate_catalog_year(1899).is_err());
    }

    #[test]
    fn floor_year_is_accepted() {
        assert!(validate_catalog_year(1900).is_ok());
    }

    #[test]
    fn current_year_is_accepted() {
        assert!(validate_catalog_year(current_year()).is_ok());
    }

    #[test]
    fn next_year_is_rejected() {
        assert!(validate_catalog_year(current_year() + 1).is_err());
    }

    #[test]
    fn png_and_jpeg_extensions_are_accepted() {
        assert!(validate_image_filename("shoe.png").is_ok());
        assert!(validate_image_filename("shoe.JPG").is_ok());
        assert!(validate_image_filename("shoe.jpeg").is_ok());
    }

    #[test]
    fn other_extensions_are_rejected() {
        assert!(validate_image_filename("shoe.gif").is_err());
        assert!(validate_image_filename("shoe.png.exe").is_err());
        assert!(validate_image_filename("no-extension").is_err());
    }

    #[test]
    fn oversized_image_is_rejected() {
        assert!(validate_image_size(MAX_IMAGE_BYTES).is_ok());
        assert!(validate_image_size(MAX_IMAGE_BYTES + 1).is_err());
    }
}

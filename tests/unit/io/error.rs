//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = MosaicError::FileSystem {
            path: "/tmp/library".into(),
            operation: "read library directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read library directory"));
    }

    // Tests DegenerateGrid error names both the grid and the image size
    // Verified by omitting image dimensions from message
    #[test]
    fn test_degenerate_grid_error() {
        let error = MosaicError::DegenerateGrid {
            grid: (1000, 1000),
            dimensions: (10, 10),
        };

        let message = error.to_string();
        assert!(message.contains("1000x1000"));
        assert!(message.contains("10x10"));
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = MosaicError::InvalidParameter {
            parameter: "columns",
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("columns"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
    }

    // Tests EmptyLibrary and UnsupportedFormat messages name their paths
    // Verified by dropping the path from both messages
    #[test]
    fn test_configuration_error_messages() {
        let empty = MosaicError::EmptyLibrary {
            path: PathBuf::from("tiles"),
        };
        assert!(empty.to_string().contains("tiles"));

        let unsupported = MosaicError::UnsupportedFormat {
            path: PathBuf::from("photo.gif"),
            extension: "gif".to_string(),
        };
        let message = unsupported.to_string();
        assert!(message.contains("photo.gif"));
        assert!(message.contains("'gif'"));
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = MosaicError::ImageExport {
            path: PathBuf::from("/restricted/output.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/output.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests InvalidIndex error formatting
    // Verified by omitting the collection length
    #[test]
    fn test_invalid_index_error() {
        let error = MosaicError::InvalidIndex {
            kind: "cell",
            index: 7,
            len: 4,
        };

        assert_eq!(error.to_string(), "cell index 7 is out of bounds (len: 4)");
    }
}

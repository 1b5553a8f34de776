//! Tests for shared constants

#[cfg(test)]
mod tests {
    use neuroview::io::configuration::{
        DEFAULT_LOG_LEVEL, DEFAULT_RECORDER_GROUP, LABEL_IMAGE_EXTENSION, MAX_LINK_DEPTH,
        OUTPUT_SUFFIX, PATH_SEPARATOR, PROGRESS_BAR_WIDTH,
    };

    // Tests output suffix format
    // Verified by changing suffix value
    #[test]
    fn test_output_suffix_format() {
        assert!(OUTPUT_SUFFIX.starts_with('_'));
        assert_eq!(OUTPUT_SUFFIX, "_relabeled");
    }

    // Tests the accepted image extension has no leading dot
    // Verified by prefixing the extension with a dot
    #[test]
    fn test_label_image_extension() {
        assert_eq!(LABEL_IMAGE_EXTENSION, "png");
    }

    // Tests the recorder group is a single path component
    // Verified by nesting the default group
    #[test]
    fn test_default_recorder_group() {
        assert!(!DEFAULT_RECORDER_GROUP.is_empty());
        assert!(!DEFAULT_RECORDER_GROUP.contains(PATH_SEPARATOR));
    }

    // Tests store limits
    // Verified by setting the link limit to zero
    #[test]
    fn test_store_limits() {
        assert_eq!(PATH_SEPARATOR, '/');
        assert_eq!(MAX_LINK_DEPTH, 16);
    }

    // Tests display defaults
    // Verified by changing the default log level
    #[test]
    fn test_display_defaults() {
        assert_eq!(DEFAULT_LOG_LEVEL, "warn");
        assert_eq!(PROGRESS_BAR_WIDTH, 40);
    }
}

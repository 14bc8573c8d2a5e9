use anyhow::Context;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use visionbox_core::inference::image::image_content_type;
use visionbox_core::inference::RawImage;
use visionbox_core::report::{render_document, ReportDocument};

/// Reads every image file in `paths`, in order. Paths that do not look like
/// images are skipped with a warning.
pub fn load_images(paths: &[PathBuf]) -> anyhow::Result<Vec<RawImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        if image_content_type(path).is_none() {
            warn!("skipping {}: not an image file", path.display());
            continue;
        }
        let bytes = fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        images.push(RawImage::new(filename, bytes));
    }
    Ok(images)
}

/// Writes the rendered report into `dir` and returns the file it created.
///
/// The text renderer keeps the suggested file stem but uses a `.txt`
/// extension.
pub fn write_report(document: &ReportDocument, dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating report dir {}", dir.display()))?;
    let path = dir
        .join(document.suggested_filename())
        .with_extension("txt");
    fs::write(&path, render_document(document))
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use visionbox_core::inference::{Detection, UploadResult};
    use visionbox_core::processing::aggregate;
    use visionbox_core::report::to_document;

    #[test]
    fn load_images_skips_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("shelf.png");
        let notes = dir.path().join("notes.txt");
        fs::write(&png, [137u8, 80, 78, 71]).unwrap();
        fs::write(&notes, "not an image").unwrap();

        let images = load_images(&[png, notes]).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].filename, "shelf.png");
        assert_eq!(images[0].bytes, vec![137u8, 80, 78, 71]);
    }

    #[test]
    fn missing_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jpg");
        assert!(load_images(&[missing]).is_err());
    }

    #[test]
    fn report_is_written_under_suggested_stem() {
        let dir = tempfile::tempdir().unwrap();
        let rows = aggregate(&[UploadResult::new(vec![Detection::new("box")], "t1")]);
        let document = to_document(&rows, "t2").unwrap();

        let path = write_report(&document, &dir.path().join("reports")).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "VisionBox_Detection_Report.txt"
        );
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("VisionBox Detection Report\nGenerated At: t2\n"));
        assert!(text.ends_with("Overall Total Count: 1\n"));
    }
}

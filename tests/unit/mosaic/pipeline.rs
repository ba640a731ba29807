//! Tests for in-memory composition and the file-level driver

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use photomosaic::MosaicError;
    use photomosaic::mosaic::color::Rgb;
    use photomosaic::mosaic::grid::GridSize;
    use photomosaic::mosaic::library::LibraryImage;
    use photomosaic::mosaic::pipeline::{
        MosaicRequest, NoopObserver, Stage, StageObserver, compose_mosaic, create_mosaic,
    };
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct StageLog {
        stages: Vec<Stage>,
        items: usize,
    }

    impl StageObserver for StageLog {
        fn stage_started(&mut self, stage: Stage, _total: usize) {
            self.stages.push(stage);
        }

        fn item_completed(&mut self) {
            self.items += 1;
        }
    }

    fn write_solid(path: &Path, width: u32, height: u32, color: [u8; 3]) {
        RgbaImage::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]))
            .save(path)
            .unwrap();
    }

    // Tests stage labels are distinct
    // Verified by reusing a label across stages
    #[test]
    fn test_stage_labels() {
        assert_ne!(Stage::LoadingLibrary.label(), Stage::AveragingCells.label());
        assert_ne!(Stage::AveragingCells.label(), Stage::Compositing.label());
    }

    // Tests in-memory composition returns cells, averages, matches and canvas
    // Verified by matching against the first library image only
    #[test]
    fn test_compose_mosaic_in_memory() {
        let source = RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgba([0, 0, 250, 255])
            } else {
                Rgba([250, 0, 0, 255])
            }
        });
        let library = vec![
            LibraryImage::new("red", RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))).unwrap(),
            LibraryImage::new("blue", RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255])))
                .unwrap(),
        ];

        let mut log = StageLog::default();
        let mosaic =
            compose_mosaic(&source, &library, GridSize::new(2, 1).unwrap(), &mut log).unwrap();

        assert_eq!(mosaic.cells.len(), 2);
        assert_eq!(mosaic.cell_averages, vec![
            Rgb::new(0, 0, 250),
            Rgb::new(250, 0, 0)
        ]);
        let chosen: Vec<usize> = mosaic.matches.iter().map(|m| m.library_index).collect();
        assert_eq!(chosen, vec![1, 0]);
        assert_eq!(mosaic.canvas.get_pixel(1, 1), &Rgba([0, 0, 255, 255]));
        assert_eq!(mosaic.canvas.get_pixel(6, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(log.stages, vec![Stage::AveragingCells, Stage::Compositing]);
        assert_eq!(log.items, 4);
    }

    // Tests configuration errors surface before any stage runs
    // Verified by checking the library after averaging
    #[test]
    fn test_compose_mosaic_configuration_errors() {
        let source = RgbaImage::from_pixel(10, 10, Rgba([1, 1, 1, 255]));
        let mut log = StageLog::default();

        let empty = compose_mosaic(&source, &[], GridSize::new(2, 2).unwrap(), &mut log);
        assert!(matches!(empty, Err(MosaicError::EmptyLibrary { .. })));

        let library =
            vec![LibraryImage::new("a", RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))).unwrap()];
        let fine = compose_mosaic(&source, &library, GridSize::new(1000, 1000).unwrap(), &mut log);
        assert!(matches!(fine, Err(MosaicError::DegenerateGrid { .. })));

        assert!(log.stages.is_empty());
    }

    // Tests an unsupported source extension fails before anything is loaded
    // Verified by moving the format check after loading
    #[test]
    fn test_create_mosaic_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("scene.bmp");
        std::fs::write(&source, b"BM").unwrap();

        let request = MosaicRequest {
            source,
            library_dir: temp_dir.path().join("missing"),
            grid: GridSize::new(2, 2).unwrap(),
            output_dir: temp_dir.path().join("out"),
        };
        let result = create_mosaic(&request, &mut NoopObserver);

        assert!(matches!(result, Err(MosaicError::UnsupportedFormat { .. })));
        assert!(!temp_dir.path().join("out").exists());
    }

    // Tests a grid finer than the source is rejected before the library loads
    // Verified by loading the library first
    #[test]
    fn test_create_mosaic_degenerate_grid_before_library() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("tiny.png");
        write_solid(&source, 10, 10, [9, 9, 9]);

        let request = MosaicRequest {
            source,
            library_dir: temp_dir.path().join("missing"),
            grid: GridSize::new(1000, 1000).unwrap(),
            output_dir: temp_dir.path().to_path_buf(),
        };
        let result = create_mosaic(&request, &mut NoopObserver);

        assert!(matches!(result, Err(MosaicError::DegenerateGrid { .. })));
    }

    // Tests a JPEG source produces a JPEG mosaic named after it
    // Verified by always encoding PNG
    #[test]
    fn test_create_mosaic_jpeg_output() {
        let temp_dir = TempDir::new().unwrap();
        let library_dir = temp_dir.path().join("library");
        std::fs::create_dir(&library_dir).unwrap();
        write_solid(&library_dir.join("gray.png"), 3, 3, [128, 128, 128]);

        let source = temp_dir.path().join("shot.jpg");
        image::RgbImage::from_pixel(12, 6, image::Rgb([120, 120, 120]))
            .save(&source)
            .unwrap();

        let request = MosaicRequest {
            source,
            library_dir: library_dir.clone(),
            grid: GridSize::new(3, 2).unwrap(),
            output_dir: temp_dir.path().join("out"),
        };
        let output = create_mosaic(&request, &mut NoopObserver).unwrap();

        assert_eq!(output.output_path, temp_dir.path().join("out").join("shot_out.jpg"));
        let format = image::ImageReader::open(&output.output_path)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format, Some(image::ImageFormat::Jpeg));
        assert_eq!(output.library_paths, vec![library_dir.join("gray.png")]);
        assert_eq!(
            output.library_path(&output.mosaic.matches[0]),
            Some(library_dir.join("gray.png").as_path())
        );
        assert_eq!(output.library_averages, vec![Rgb::new(128, 128, 128)]);
        assert_eq!(
            output.library_average(&output.mosaic.matches[0]),
            Some(Rgb::new(128, 128, 128))
        );
    }
}

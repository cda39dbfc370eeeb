//! Property tests spanning pixkit-core and pixkit-ops.
//!
//! Randomized cases use a fixed seed so failures reproduce.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pixkit_core::{PixelBuffer, Rect, Rgb};
    use pixkit_ops::colorspace::{hsl_to_rgb255, rgb255_to_hsl};
    use pixkit_ops::composite::{CompositionItem, CompositionOptions, compose};
    use pixkit_ops::grayscale::{GrayMode, to_grayscale};
    use pixkit_ops::grid::{GridConfig, assemble_grid, slice_grid};
    use pixkit_ops::sketch::extract_sketch;
    use pixkit_ops::tone::{FilterPreset, ToneParameters, apply_tone};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_buffer(rng: &mut StdRng, w: u32, h: u32) -> PixelBuffer {
        let data: Vec<u8> = (0..w * h * 4).map(|_| rng.r#gen()).collect();
        PixelBuffer::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn test_neutral_tone_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let (w, h) = (rng.gen_range(1..24), rng.gen_range(1..24));
            let img = random_buffer(&mut rng, w, h);
            let out = apply_tone(&img, &ToneParameters::default()).unwrap();
            assert_eq!(out, img);
        }
    }

    #[test]
    fn test_extreme_parameters_stay_valid() {
        let mut rng = StdRng::seed_from_u64(2);
        let img = random_buffer(&mut rng, 17, 11);
        for _ in 0..50 {
            let filter = FilterPreset::ALL[rng.gen_range(0..FilterPreset::ALL.len())];
            let mut r = || rng.gen_range(-400.0..400.0);
            let params = ToneParameters {
                brightness: r(),
                contrast: r(),
                saturation: r(),
                highlights: r(),
                shadows: r(),
                temperature: r(),
                sharpness: r(),
                vignette: r(),
                filter,
                ..Default::default()
            };
            let out = apply_tone(&img, &params).unwrap();
            assert_eq!(out.dimensions(), img.dimensions());
            assert_eq!(out.data().len(), 17 * 11 * 4);
        }
    }

    #[test]
    fn test_operations_do_not_mutate_input() {
        let mut rng = StdRng::seed_from_u64(3);
        let img = random_buffer(&mut rng, 12, 9);
        let before = img.clone();
        let params = ToneParameters {
            brightness: 30.0,
            sharpness: 80.0,
            vignette: 50.0,
            filter: FilterPreset::Dramatic,
            rotation: 45.0,
            ..Default::default()
        };
        apply_tone(&img, &params).unwrap();
        to_grayscale(&img, GrayMode::Soft, 150.0, 50.0);
        extract_sketch(&img, 10.0, 100.0, 100.0).unwrap();
        slice_grid(&img, &GridConfig::default()).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_grid_reconstruction() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..25 {
            let (w, h) = (rng.gen_range(3..40), rng.gen_range(3..40));
            let img = random_buffer(&mut rng, w, h);
            let s = w.min(h);
            let cell = s / 3;
            let cells = slice_grid(&img, &GridConfig::default()).unwrap();
            assert_eq!(cells.len(), 9);

            let sheet = assemble_grid(&cells, 3, 0, Rgb::WHITE).unwrap();
            let square = Rect::new((w - s) / 2, (h - s) / 2, cell * 3, cell * 3);
            assert_eq!(sheet, img.sub_image(square).unwrap(), "{}x{}", w, h);
        }
    }

    #[test]
    fn test_grayscale_flattening() {
        let mut rng = StdRng::seed_from_u64(5);
        let img = random_buffer(&mut rng, 32, 16);
        for mode in GrayMode::ALL {
            let out = to_grayscale(&img, mode, 100.0, 100.0);
            for ((x, y, p), (_, _, src)) in out.pixels().zip(img.pixels()) {
                assert!(p[0] == p[1] && p[1] == p[2], "{} at {},{}", mode, x, y);
                assert_eq!(p[3], src[3]);
            }
        }
    }

    #[test]
    fn test_hsl_roundtrip() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..1000 {
            let rgb: [f64; 3] = [(); 3].map(|_| rng.gen_range(0..=255u8) as f64);
            let (h, s, l) = rgb255_to_hsl(rgb[0], rgb[1], rgb[2]);
            let (r, g, b) = hsl_to_rgb255(h, s, l);
            assert_abs_diff_eq!(r, rgb[0], epsilon = 1.0);
            assert_abs_diff_eq!(g, rgb[1], epsilon = 1.0);
            assert_abs_diff_eq!(b, rgb[2], epsilon = 1.0);
        }
    }

    #[test]
    fn test_compose_bounding_box() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..30 {
            let n = rng.gen_range(1..6);
            let padding = rng.gen_range(0..5);
            let items: Vec<CompositionItem> = (0..n)
                .map(|_| {
                    let buf = PixelBuffer::filled(rng.gen_range(1..10), rng.gen_range(1..10), [9, 9, 9, 255])
                        .unwrap();
                    CompositionItem::new(buf, rng.gen_range(0..30), rng.gen_range(0..30))
                })
                .collect();
            let expect_w = items.iter().map(|i| i.position.x as u32 + i.buffer.width()).max().unwrap();
            let expect_h = items.iter().map(|i| i.position.y as u32 + i.buffer.height()).max().unwrap();

            let options = CompositionOptions { padding, ..Default::default() };
            let out = compose(&items, &options).unwrap();
            assert_eq!(out.dimensions(), (expect_w + 2 * padding, expect_h + 2 * padding));
        }
    }

    #[test]
    fn test_white_square_scenario() {
        let white = PixelBuffer::filled(4, 4, [255, 255, 255, 255]).unwrap();

        let dark = apply_tone(&white, &ToneParameters { brightness: -100.0, ..Default::default() }).unwrap();
        assert!(dark.pixels().all(|(_, _, p)| p[..3] == [0, 0, 0]));

        for threshold in [0.0, 1.0, 30.0, 99.0, 100.0] {
            let lines = extract_sketch(&white, threshold, 50.0, 50.0).unwrap();
            assert!(lines.pixels().all(|(_, _, p)| p[..3] == [0, 0, 0]));
        }
    }
}

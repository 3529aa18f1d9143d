//! Stitch chart regression test
//!
//! Full chart pages with internal lattice, bold lines, page clutter and
//! a footer rule, fed through owned images, decoded files and borrowed
//! RGBA buffers.
//!
//! Run with:
//! ```
//! cargo test -p gridcrop-detect --test stitch_chart_reg
//! ```

use gridcrop_core::{Color, GridBounds, PixView};
use gridcrop_detect::{DetectionConfig, detect_and_crop, detect_grid_bounds};
use gridcrop_io::{ImageFormat, read_image_mem, write_image_mem};
use gridcrop_test::{RegParams, synth};

#[test]
fn stitch_chart_reg() {
    let mut rp = RegParams::new("stitch_chart");
    let config = DetectionConfig::default();

    let charts = [
        synth::StitchChart::default(),
        synth::StitchChart::default().with_distractor_rule(true),
        synth::StitchChart::default().with_bold_every(0).with_clutter(false),
        synth::StitchChart::default()
            .with_page(850, 1100)
            .with_origin(100, 150)
            .with_cells(60, 80, 10)
            .with_distractor_rule(true),
        synth::StitchChart::default()
            .with_page(600, 500)
            .with_origin(60, 50)
            .with_cells(24, 20, 20)
            .with_border_thickness(3)
            .with_bold_every(5),
        synth::StitchChart::default().with_ink(Color::new(30, 40, 90)),
    ];

    for chart in &charts {
        let pix = chart.render().unwrap();
        let (bounds, cropped) = detect_and_crop(&pix, &config).unwrap();
        rp.compare_bounds(&chart.grid_bounds(), &bounds, 2);
        rp.write_pix(&cropped, ImageFormat::Png).unwrap();
    }

    assert!(rp.cleanup());
}

#[test]
fn stitch_chart_decoded_reg() {
    let mut rp = RegParams::new("stitch_chart_decoded");
    let config = DetectionConfig::default();
    let chart = synth::StitchChart::default().with_distractor_rule(true);
    let pix = chart.render().unwrap();
    let expected = detect_grid_bounds(&pix, &config).unwrap();

    // Lossless round trips detect identically
    for format in [ImageFormat::Png, ImageFormat::Pnm] {
        let bytes = write_image_mem(&pix, format).unwrap();
        let decoded = read_image_mem(&bytes).unwrap();
        let bounds = detect_grid_bounds(&decoded, &config).unwrap();
        rp.compare_bounds(&expected, &bounds, 0);
    }

    // A caller's RGBA buffer, borrowed without copying
    let mut rgba = Vec::with_capacity(pix.data().len() / 3 * 4);
    for px in pix.data().chunks_exact(3) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    let view = PixView::new(&rgba, pix.width(), pix.height(), 4).unwrap();
    let bounds = detect_grid_bounds(&view, &config).unwrap();
    rp.compare_bounds(&expected, &bounds, 0);

    // Expansion pads the accepted rectangle on every side
    let padded = detect_grid_bounds(&view, &config.clone().with_border_expansion(4)).unwrap();
    rp.compare_bounds(
        &GridBounds::new(
            expected.x - 4,
            expected.y - 4,
            expected.width + 8,
            expected.height + 8,
        ),
        &padded,
        0,
    );

    assert!(rp.cleanup());
}

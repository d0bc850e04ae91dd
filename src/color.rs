use clap::ValueEnum;
use once_cell::sync::Lazy;
use palette::white_point::D65;
use palette::{FromColor, Srgb, Xyz};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Rgb – an 8-bit display color
// ---------------------------------------------------------------------------

/// An 8-bit RGB triple, the unit every swatch and spectrum bar renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Which wavelength→color conversion the application uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorModel {
    /// Bruton's piecewise-linear approximation (self-contained).
    #[default]
    Bruton,
    /// CIE 1931 color matching functions, converted to sRGB.
    Cie,
}

impl ColorModel {
    pub fn to_rgb(self, nm: f64) -> Rgb {
        match self {
            ColorModel::Bruton => wavelength_to_rgb(nm),
            ColorModel::Cie => wavelength_to_rgb_cie(nm),
        }
    }
}

// ---------------------------------------------------------------------------
// Bruton's wavelength → RGB approximation
// ---------------------------------------------------------------------------

/// Approximate display color of monochromatic light, after Dan Bruton.
///
/// Six linear hue bands cover 380–645 nm; anything else keys the final red
/// branch. The attenuation factor ramps 0.3→1.0 over [380,420), holds 1.0
/// over [420,645), ramps back 1.0→0.3 over [645,780), and is 0.0 outside
/// [380,780) — so both ultraviolet and far infrared come out black, while
/// 380.0 itself sits on the dim end of the ramp. Total and deterministic
/// for every finite input.
pub fn wavelength_to_rgb(nm: f64) -> Rgb {
    let (r, g, b) = match nm {
        w if (380.0..440.0).contains(&w) => (-(w - 440.0) / 60.0, 0.0, 1.0),
        w if (440.0..490.0).contains(&w) => (0.0, (w - 440.0) / 50.0, 1.0),
        w if (490.0..510.0).contains(&w) => (0.0, 1.0, -(w - 510.0) / 20.0),
        w if (510.0..580.0).contains(&w) => ((w - 510.0) / 70.0, 1.0, 0.0),
        w if (580.0..645.0).contains(&w) => (1.0, -(w - 645.0) / 65.0, 0.0),
        _ => (1.0, 0.0, 0.0),
    };

    let factor = if (380.0..420.0).contains(&nm) {
        0.3 + 0.7 * (nm - 380.0) / 40.0
    } else if (420.0..645.0).contains(&nm) {
        1.0
    } else if (645.0..780.0).contains(&nm) {
        0.3 + 0.7 * (780.0 - nm) / 135.0
    } else {
        0.0
    };

    let channel = |c: f64| (c * factor * 255.0).clamp(0.0, 255.0).round() as u8;
    Rgb(channel(r), channel(g), channel(b))
}

// ---------------------------------------------------------------------------
// CIE 1931 path
// ---------------------------------------------------------------------------

/// CIE 1931 2° standard observer color-matching table, 5 nm steps.
const CIE_CSV: &str = include_str!("../assets/cie_xyz_1931_2deg.csv");

#[derive(Debug, Deserialize)]
struct CieRow {
    wavelength: f64,
    x: f64,
    y: f64,
    z: f64,
}

static CIE_1931: Lazy<Vec<CieRow>> = Lazy::new(|| {
    let mut reader = csv::Reader::from_reader(CIE_CSV.as_bytes());
    reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("embedded CIE table is well-formed")
});

/// Tristimulus values of monochromatic light, linearly interpolated from
/// the embedded table and clamped to its endpoints outside [380,780].
pub fn wavelength_to_xyz(nm: f64) -> (f64, f64, f64) {
    let table = &*CIE_1931;
    let first = &table[0];
    let last = &table[table.len() - 1];
    if nm <= first.wavelength {
        return (first.x, first.y, first.z);
    }
    if nm >= last.wavelength {
        return (last.x, last.y, last.z);
    }
    let i = table.partition_point(|row| row.wavelength < nm);
    let (lo, hi) = (&table[i - 1], &table[i]);
    let k = (nm - lo.wavelength) / (hi.wavelength - lo.wavelength);
    (
        lo.x + k * (hi.x - lo.x),
        lo.y + k * (hi.y - lo.y),
        lo.z + k * (hi.z - lo.z),
    )
}

/// The alternative color path: CIE XYZ → sRGB. Out-of-gamut channels are
/// clamped, so saturated spectral colors land on the gamut boundary.
pub fn wavelength_to_rgb_cie(nm: f64) -> Rgb {
    let (x, y, z) = wavelength_to_xyz(nm);
    let xyz: Xyz<D65, f64> = Xyz::new(x, y, z);
    let rgb: Srgb<f64> = Srgb::from_color(xyz);
    Rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_wavelengths_are_black() {
        assert_eq!(wavelength_to_rgb(379.9), Rgb::BLACK);
        assert_eq!(wavelength_to_rgb(780.0), Rgb::BLACK);
        assert_eq!(wavelength_to_rgb(780.1), Rgb::BLACK);
        assert_eq!(wavelength_to_rgb(0.0), Rgb::BLACK);
        assert_eq!(wavelength_to_rgb(10_000.0), Rgb::BLACK);
    }

    #[test]
    fn lower_boundary_uses_the_ramp_not_the_fallback() {
        // At exactly 380 nm the factor is 0.3: dim violet, not black.
        assert_eq!(wavelength_to_rgb(380.0), Rgb(77, 0, 77));
    }

    #[test]
    fn green_dominates_at_550() {
        let Rgb(r, g, b) = wavelength_to_rgb(550.0);
        assert_eq!(g, 255);
        assert_eq!(b, 0);
        assert!(r < g);
    }

    #[test]
    fn deep_red_has_only_a_red_component() {
        let Rgb(r, g, b) = wavelength_to_rgb(700.0);
        assert!(r > 0);
        assert_eq!(g, 0);
        assert_eq!(b, 0);
    }

    #[test]
    fn attenuation_fades_toward_both_ends() {
        let Rgb(r_mid, ..) = wavelength_to_rgb(650.0);
        let Rgb(r_far, ..) = wavelength_to_rgb(770.0);
        assert!(r_far < r_mid);

        let Rgb(.., b_mid) = wavelength_to_rgb(410.0);
        let Rgb(.., b_near) = wavelength_to_rgb(385.0);
        assert!(b_near < b_mid);
    }

    #[test]
    fn full_sweep_stays_defined() {
        let mut nm = 300.0;
        while nm < 900.0 {
            // Must never panic; u8 channels are in range by construction.
            let _ = wavelength_to_rgb(nm);
            nm += 0.5;
        }
    }

    #[test]
    fn cie_luminosity_peaks_near_555() {
        let (_, y_peak, _) = wavelength_to_xyz(555.0);
        let (_, y_lo, _) = wavelength_to_xyz(500.0);
        let (_, y_hi, _) = wavelength_to_xyz(620.0);
        assert!(y_peak > 0.99 && y_peak <= 1.01);
        assert!(y_lo < y_peak);
        assert!(y_hi < y_peak);
    }

    #[test]
    fn cie_interpolates_between_table_rows() {
        let (_, y_552, _) = wavelength_to_xyz(552.5);
        let (_, y_550, _) = wavelength_to_xyz(550.0);
        let (_, y_555, _) = wavelength_to_xyz(555.0);
        assert!(y_550 < y_552 && y_552 < y_555);
    }

    #[test]
    fn cie_path_agrees_on_green() {
        let Rgb(r, g, b) = wavelength_to_rgb_cie(550.0);
        assert!(g > r);
        assert!(g > b);
    }
}

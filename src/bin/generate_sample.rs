//! Writes `sample_lines.tsv`, a small line list in the NIST tab-separated
//! export format, for trying the browser:
//!
//! ```text
//! cargo run --bin generate_sample
//! cargo run -- sample_lines.tsv
//! ```
//!
//! The file deliberately includes the quirks the parser has to cope with:
//! a repeated trailing header block with footer notes, annotated intensity
//! cells, and rows where only one of the two wavelength columns is filled.

use std::fs::File;
use std::io::{BufWriter, Result, Write};

const HEADER: &str = "element\tsp_num\tobs_wl(nm)\tunc_obs_wl\tritz_wl_vac(nm)\tunc_ritz_wl\tintens\tAki(s^-1)\tAcc\tEi(eV)\tEk(eV)\tconf_i\tterm_i\tJ_i\tconf_k\tterm_k\tJ_k\tType\ttp_ref\tline_ref";

const ROWS: &[&str] = &[
    "H\t1\t410.1734\t0.0006\t410.2892\t0.0001\t70000\t9.7320e+05\tAAA\t10.19880615\t13.22070146\t2p\t2P*\t\t6d\t2D\t\t\tT8637\tL7400",
    "H\t1\t434.0472\t0.0006\t434.1692\t0.0001\t90000\t2.5304e+06\tAAA\t10.19880615\t13.05450198\t2p\t2P*\t\t5d\t2D\t\t\tT8637\tL7400",
    "H\t1\t486.135\t0.001\t486.2721\t0.0002\t180000\t8.4193e+06\tAAA\t10.19880615\t12.74853166\t2p\t2P*\t\t4d\t2D\t\t\tT8637\tL7400",
    "H\t1\t656.279\t0.003\t656.4522\t0.0002\t500000h\t4.4101e+07\tAAA\t10.19880615\t12.08749935\t2p\t2P*\t\t3d\t2D\t\t\tT8637\tL11759",
    "He\t1\t447.148\t0.001\t447.2735\t0.0004\t200\t2.4579e+07\tAAA\t20.96408703\t23.73609066\t1s.2p\t3P*\t2\t1s.4d\t3D\t3\t\tT7771\tL7512",
    "He\t1\t\t\t587.7249\t0.0004\t500\t7.0706e+07\tAAA\t20.96408703\t23.07365097\t1s.2p\t3P*\t2\t1s.3d\t3D\t3\t\tT7771\tL7512",
    "He\t1\t667.8151\t0.0004\t668.0005\t0.0004\t100\t6.3705e+07\tAAA\t21.21802284\t23.07407493\t1s.2p\t1P*\t1\t1s.3d\t1D\t2\t\tT7771\tL7512",
    "Na\t1\t588.995\t0.001\t589.1583\t0.0003\t(80000)\t6.1600e+07\tAA\t0.00000000\t2.10442906\t2p6.3s\t2S\t1/2\t2p6.3p\t2P*\t3/2\t\tT7771\tL2752",
    "Na\t1\t589.5924\t0.001\t589.7558\t0.0003\t40000*\t6.1400e+07\tAA\t0.00000000\t2.10229886\t2p6.3s\t2S\t1/2\t2p6.3p\t2P*\t1/2\t\tT7771\tL2752",
    "Fe\t1\t438.3545\t0.0002\t438.4773\t0.0002\t1200\t5.0000e+07\tB+\t1.48583610\t4.31330422\t3d7.4s\t5F\t5\t3d7.4p\t5G*\t6\t\tT9239\tL5847",
    "Fe\t1\t527.0360\t0.0003\t527.1829\t0.0003\tN/A\t1.2000e+06\tC\t0.85884528\t3.21074750\t3d6.4s2\t5D\t3\t3d7.4p\t5F*\t4\t\tT9239\tL5847",
    "Fe\t1\t540.5775\t0.0003\t540.7278\t0.0003\t100bl\t1.0000e+06\tC+\t0.99012350\t3.28302010\t3d7.4s\t5F\t2\t3d7.4p\t5F*\t2\t\tT9239\tL5847",
    "Fe\t2\t\t\t259.9396\t0.0002\t12000\t2.3500e+08\tAA\t0.00000000\t4.76863000\t3d6.4s\t6D\t9/2\t3d6.4p\t6F*\t11/2\t\tT4894\tL3059",
];

fn main() -> Result<()> {
    let file = File::create("sample_lines.tsv")?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{HEADER}")?;
    for row in ROWS {
        writeln!(out, "{row}")?;
    }
    // NIST exports repeat the header block before their footer notes; the
    // parser is expected to drop everything from here on.
    writeln!(out, "{HEADER}")?;
    writeln!(out, "Observed and Ritz wavelengths are given in nm.")?;

    out.flush()?;
    println!("wrote sample_lines.tsv ({} lines)", ROWS.len());
    Ok(())
}

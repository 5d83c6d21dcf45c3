//! Textual summary of computed section properties.

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::errors::{FormatSpecError, ReportError};
use crate::format::NumberFormat;
use crate::results::ResultsSource;

/// Heading printed before the area line.
pub const HEADING: &str = "Section Properties:";

/// One named block of the report.
///
/// `gate` decides whether the block is printed at all, `values` supplies one
/// entry per label. A few blocks are gated on a neighbouring quantity (the
/// principal moments on `phi`, the Trefftz shear centre on `x_se`, the
/// principal shear areas on `A_sx`), so a gate can be open while a value is
/// still missing.
struct PropertyGroup {
    /// Name used in log output.
    name: &'static str,
    /// Line written before the block, if any.
    heading: Option<&'static str>,
    /// One label per printed line.
    labels: &'static [&'static str],
    /// Whether the block is printed.
    gate: fn(&dyn ResultsSource) -> bool,
    /// Values in label order; `None` where the quantity was not computed.
    values: fn(&dyn ResultsSource) -> Vec<Option<f64>>,
}

/// Values of a single-quantity block.
fn one(value: Option<f64>) -> Vec<Option<f64>> {
    vec![value]
}

/// Values of a two-quantity block.
fn two(values: Option<(f64, f64)>) -> Vec<Option<f64>> {
    vec![values.map(|v| v.0), values.map(|v| v.1)]
}

/// Values of a three-quantity block.
fn three(values: Option<(f64, f64, f64)>) -> Vec<Option<f64>> {
    vec![values.map(|v| v.0), values.map(|v| v.1), values.map(|v| v.2)]
}

/// Values of a four-quantity block.
fn four(values: Option<(f64, f64, f64, f64)>) -> Vec<Option<f64>> {
    vec![
        values.map(|v| v.0),
        values.map(|v| v.1),
        values.map(|v| v.2),
        values.map(|v| v.3),
    ]
}

/// Report blocks in print order.
static GROUPS: [PropertyGroup; 21] = [
    PropertyGroup {
        name: "area",
        heading: Some(HEADING),
        labels: &["Area"],
        gate: |s| s.area().is_some(),
        values: |s| one(s.area()),
    },
    PropertyGroup {
        name: "first moments",
        heading: None,
        labels: &["Qx", "Qy"],
        gate: |s| s.first_moments().is_some(),
        values: |s| two(s.first_moments()),
    },
    PropertyGroup {
        name: "centroid",
        heading: None,
        labels: &["cx", "cy"],
        gate: |s| s.centroid().is_some(),
        values: |s| two(s.centroid()),
    },
    PropertyGroup {
        name: "global second moments",
        heading: None,
        labels: &["Ixx_g", "Iyy_g", "Ixy_g"],
        gate: |s| s.global_second_moments().is_some(),
        values: |s| three(s.global_second_moments()),
    },
    PropertyGroup {
        name: "centroidal second moments",
        heading: None,
        labels: &["Ixx_c", "Iyy_c", "Ixy_c"],
        gate: |s| s.centroidal_second_moments().is_some(),
        values: |s| three(s.centroidal_second_moments()),
    },
    PropertyGroup {
        name: "section moduli",
        heading: None,
        labels: &["Zxx+", "Zxx-", "Zyy+", "Zyy-"],
        gate: |s| s.section_moduli().is_some(),
        values: |s| four(s.section_moduli()),
    },
    PropertyGroup {
        name: "radii of gyration",
        heading: None,
        labels: &["rx", "ry"],
        gate: |s| s.radii_of_gyration().is_some(),
        values: |s| two(s.radii_of_gyration()),
    },
    PropertyGroup {
        name: "principal axes",
        heading: None,
        labels: &["phi", "I11_c", "I22_c"],
        gate: |s| s.principal_angle().is_some(),
        values: |s| {
            let mut values = one(s.principal_angle());
            values.extend(two(s.principal_second_moments()));
            values
        },
    },
    PropertyGroup {
        name: "principal section moduli",
        heading: None,
        labels: &["Z11+", "Z11-", "Z22+", "Z22-"],
        gate: |s| s.principal_section_moduli().is_some(),
        values: |s| four(s.principal_section_moduli()),
    },
    PropertyGroup {
        name: "principal radii of gyration",
        heading: None,
        labels: &["r11", "r22"],
        gate: |s| s.principal_radii_of_gyration().is_some(),
        values: |s| two(s.principal_radii_of_gyration()),
    },
    PropertyGroup {
        name: "torsion constant",
        heading: None,
        labels: &["J"],
        gate: |s| s.torsion_constant().is_some(),
        values: |s| one(s.torsion_constant()),
    },
    PropertyGroup {
        name: "warping constant",
        heading: None,
        labels: &["Iw"],
        gate: |s| s.warping_constant().is_some(),
        values: |s| one(s.warping_constant()),
    },
    PropertyGroup {
        name: "elastic shear centre",
        heading: None,
        labels: &["x_se", "y_se"],
        gate: |s| s.elastic_shear_centre().is_some(),
        values: |s| two(s.elastic_shear_centre()),
    },
    PropertyGroup {
        name: "trefftz shear centre",
        heading: None,
        labels: &["x_st", "y_st"],
        gate: |s| s.elastic_shear_centre().is_some(),
        values: |s| two(s.trefftz_shear_centre()),
    },
    PropertyGroup {
        name: "principal shear centre",
        heading: None,
        labels: &["x1_se", "y2_se"],
        gate: |s| s.principal_shear_centre().is_some(),
        values: |s| two(s.principal_shear_centre()),
    },
    PropertyGroup {
        name: "shear areas",
        heading: None,
        labels: &["A_sx", "A_sy"],
        gate: |s| s.shear_areas().is_some(),
        values: |s| two(s.shear_areas()),
    },
    PropertyGroup {
        name: "principal shear areas",
        heading: None,
        labels: &["A_s11", "A_s22"],
        gate: |s| s.shear_areas().is_some(),
        values: |s| two(s.principal_shear_areas()),
    },
    PropertyGroup {
        name: "plastic centroid",
        heading: None,
        labels: &["x_pc", "y_pc"],
        gate: |s| s.plastic_centroid().is_some(),
        values: |s| two(s.plastic_centroid()),
    },
    PropertyGroup {
        name: "plastic moduli",
        heading: None,
        labels: &["Sxx", "Syy", "SF_xx+", "SF_xx-", "SF_yy+", "SF_yy-"],
        gate: |s| s.plastic_moduli().is_some(),
        values: |s| {
            let mut values = two(s.plastic_moduli());
            values.extend(four(s.shape_factors()));
            values
        },
    },
    PropertyGroup {
        name: "principal plastic centroid",
        heading: None,
        labels: &["x1_pc", "y2_pc"],
        gate: |s| s.principal_plastic_centroid().is_some(),
        values: |s| two(s.principal_plastic_centroid()),
    },
    PropertyGroup {
        name: "principal plastic moduli",
        heading: None,
        labels: &["S11", "S22", "SF_11+", "SF_11-", "SF_22+", "SF_22-"],
        gate: |s| s.principal_plastic_moduli().is_some(),
        values: |s| {
            let mut values = two(s.principal_plastic_moduli());
            values.extend(four(s.principal_shape_factors()));
            values
        },
    },
];

/// Every label the report can print, in print order.
pub fn canonical_labels() -> impl Iterator<Item = &'static str> {
    GROUPS.iter().flat_map(|group| group.labels.iter().copied())
}

/// Write the report for `source` to `out`, formatting every value with `fmt`.
///
/// Groups that have not been computed are skipped silently. The report always
/// ends with one blank line. A malformed `fmt` is reported at the first line
/// that needs it, so earlier lines (the heading included) stay on the stream
/// and a report with nothing computed never fails.
///
/// # Examples
///
/// ```
/// use sectionx::{write_results, SectionProperties};
///
/// let properties = SectionProperties {
///     area: Some(250.0),
///     ..SectionProperties::new()
/// };
/// let mut out = Vec::new();
/// write_results(&mut out, &properties, ".2f").expect("report is written");
/// assert_eq!(
///     String::from_utf8(out).expect("report is utf-8"),
///     "Section Properties:\nArea\t = 250.00\n\n"
/// );
/// ```
pub fn write_results<W, S>(out: &mut W, source: &S, fmt: &str) -> Result<(), ReportError>
where
    W: Write,
    S: ResultsSource,
{
    let source: &dyn ResultsSource = source;
    let format: Result<NumberFormat, FormatSpecError> = NumberFormat::parse(&format!(">{fmt}"));

    for group in &GROUPS {
        if !(group.gate)(source) {
            trace!(group = group.name, "not computed, skipping");
            continue;
        }
        debug!(group = group.name, "writing property group");

        if let Some(heading) = group.heading {
            writeln!(out, "{heading}")?;
        }

        let format = format.as_ref().map_err(|error| error.clone())?;
        for (label, value) in group.labels.iter().copied().zip((group.values)(source)) {
            let value = value.ok_or(ReportError::MissingValue { label })?;
            let line = format!("{label}\t = {}\n", format.apply(value));
            out.write_all(line.as_bytes())?;
        }
    }

    out.write_all(b"\n")?;
    Ok(())
}

/// Print the report for `source` to standard output.
pub fn print_results<S: ResultsSource>(source: &S, fmt: &str) -> Result<(), ReportError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_results(&mut handle, source, fmt)?;
    handle.flush()?;
    Ok(())
}

/// Render the report for `source` into a string.
#[must_use = "the rendered report is returned, not printed"]
pub fn render_results<S: ResultsSource>(source: &S, fmt: &str) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_results(&mut buffer, source, fmt)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::SectionProperties;

    #[test]
    fn every_group_has_a_value_per_label() {
        let full = SectionProperties {
            area: Some(1.0),
            q: Some((1.0, 1.0)),
            c: Some((1.0, 1.0)),
            ig: Some((1.0, 1.0, 1.0)),
            ic: Some((1.0, 1.0, 1.0)),
            z: Some((1.0, 1.0, 1.0, 1.0)),
            rc: Some((1.0, 1.0)),
            phi: Some(1.0),
            ip: Some((1.0, 1.0)),
            zp: Some((1.0, 1.0, 1.0, 1.0)),
            rp: Some((1.0, 1.0)),
            j: Some(1.0),
            gamma: Some(1.0),
            sc_e: Some((1.0, 1.0)),
            sc_t: Some((1.0, 1.0)),
            sc_p_e: Some((1.0, 1.0)),
            a_s: Some((1.0, 1.0)),
            a_s_p: Some((1.0, 1.0)),
            pc: Some((1.0, 1.0)),
            s: Some((1.0, 1.0)),
            sf: Some((1.0, 1.0, 1.0, 1.0)),
            pc_p: Some((1.0, 1.0)),
            sp: Some((1.0, 1.0)),
            sf_p: Some((1.0, 1.0, 1.0, 1.0)),
        };
        for group in &GROUPS {
            let values = (group.values)(&full);
            assert_eq!(values.len(), group.labels.len(), "group {}", group.name);
            assert!(values.iter().all(Option::is_some), "group {}", group.name);
        }
    }

    #[test]
    fn labels_follow_print_order() {
        let labels: Vec<_> = canonical_labels().collect();
        assert_eq!(labels.first(), Some(&"Area"));
        let position = |label: &str| {
            labels
                .iter()
                .position(|candidate| *candidate == label)
                .expect("label is reported")
        };
        assert!(position("cy") < position("Ixx_g"));
        assert!(position("phi") + 1 == position("I11_c"));
        assert!(position("Iw") < position("x_se"));
        assert!(position("y_se") + 1 == position("x_st"));
        assert!(position("A_sy") + 1 == position("A_s11"));
        assert_eq!(labels.len(), 54);
    }

    #[test]
    fn heading_is_tied_to_area_only() {
        let properties = SectionProperties {
            j: Some(300.0),
            ..SectionProperties::new()
        };
        let report = render_results(&properties, ".1f").expect("report renders");
        assert_eq!(report, "J\t = 300.0\n\n");
    }

    #[test]
    fn width_right_aligns_values() {
        let properties = SectionProperties {
            area: Some(2.5),
            ..SectionProperties::new()
        };
        let report = render_results(&properties, "10.3f").expect("report renders");
        assert_eq!(report, "Section Properties:\nArea\t =      2.500\n\n");
    }

    #[test]
    fn open_gate_without_values_reports_missing_label() {
        let properties = SectionProperties {
            phi: Some(12.0),
            ..SectionProperties::new()
        };
        let mut out = Vec::new();
        let error = write_results(&mut out, &properties, ".1f").expect_err("moments missing");
        assert!(matches!(error, ReportError::MissingValue { label: "I11_c" }));
        assert_eq!(String::from_utf8_lossy(&out), "phi\t = 12.0\n");
    }
}

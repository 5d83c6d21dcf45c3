use std::io::Write;

use sectionx::{
    render_results, write_results, FormatSpecError, ReportError, ResultsSource, SectionProperties,
};

/// Source that only knows its principal second moments, not the angle.
struct MomentsWithoutAngle;

impl ResultsSource for MomentsWithoutAngle {
    fn principal_second_moments(&self) -> Option<(f64, f64)> {
        Some((10.0, 20.0))
    }
}

/// Source with nothing computed.
struct Uncomputed;

impl ResultsSource for Uncomputed {}

fn section(area: f64) -> SectionProperties {
    SectionProperties {
        area: Some(area),
        ..SectionProperties::new()
    }
}

#[test]
fn nothing_computed_prints_single_blank_line() {
    let report = render_results(&Uncomputed, ".3e").expect("report renders");
    assert_eq!(report, "\n");
}

#[test]
fn nothing_computed_ignores_malformed_format() {
    let report =
        render_results(&SectionProperties::new(), "not a format").expect("nothing to format");
    assert_eq!(report, "\n");
}

#[test]
fn area_only_prints_heading_area_and_blank_line() {
    let report = render_results(&section(1234.5), "12.2f").expect("report renders");
    assert_eq!(report, "Section Properties:\nArea\t =      1234.50\n\n");
}

#[test]
fn groups_follow_canonical_order() {
    // Fields are filled in reverse print order; the output order must not change.
    let mut properties = SectionProperties::new();
    properties.j = Some(300.0);
    properties.c = Some((1.5, 2.5));
    properties.area = Some(200.0);

    let report = render_results(&properties, ".3e").expect("report renders");
    assert_eq!(
        report,
        "Section Properties:\n\
         Area\t = 2.000e+02\n\
         cx\t = 1.500e+00\n\
         cy\t = 2.500e+00\n\
         J\t = 3.000e+02\n\
         \n"
    );
}

#[test]
fn principal_moments_are_gated_on_angle() {
    let report = render_results(&MomentsWithoutAngle, ".3e").expect("report renders");
    assert_eq!(report, "\n");
}

#[test]
fn principal_moments_print_after_angle() {
    let properties = SectionProperties {
        phi: Some(-30.0),
        ip: Some((50.0, 5.0)),
        ..SectionProperties::new()
    };
    let report = render_results(&properties, ".1f").expect("report renders");
    assert_eq!(report, "phi\t = -30.0\nI11_c\t = 50.0\nI22_c\t = 5.0\n\n");
}

#[test]
fn trefftz_shear_centre_is_gated_on_elastic_shear_centre() {
    let orphan = SectionProperties {
        sc_t: Some((1.0, 2.0)),
        ..SectionProperties::new()
    };
    assert_eq!(render_results(&orphan, ".1f").expect("report renders"), "\n");

    let both = SectionProperties {
        sc_e: Some((0.5, 0.25)),
        sc_t: Some((1.0, 2.0)),
        ..SectionProperties::new()
    };
    assert_eq!(
        render_results(&both, ".2f").expect("report renders"),
        "x_se\t = 0.50\ny_se\t = 0.25\nx_st\t = 1.00\ny_st\t = 2.00\n\n"
    );
}

#[test]
fn principal_shear_areas_are_gated_on_global_shear_areas() {
    let orphan = SectionProperties {
        a_s_p: Some((3.0, 4.0)),
        ..SectionProperties::new()
    };
    assert_eq!(render_results(&orphan, ".1f").expect("report renders"), "\n");

    let both = SectionProperties {
        a_s: Some((1.0, 2.0)),
        a_s_p: Some((3.0, 4.0)),
        ..SectionProperties::new()
    };
    assert_eq!(
        render_results(&both, ".1f").expect("report renders"),
        "A_sx\t = 1.0\nA_sy\t = 2.0\nA_s11\t = 3.0\nA_s22\t = 4.0\n\n"
    );
}

#[test]
fn plastic_properties_follow_shear_areas() {
    let properties = SectionProperties {
        a_s: Some((1.0, 2.0)),
        a_s_p: Some((3.0, 4.0)),
        s: Some((5.0, 6.0)),
        sf: Some((1.5, 1.5, 1.25, 1.25)),
        ..SectionProperties::new()
    };
    let report = render_results(&properties, ".2f").expect("report renders");
    let labels: Vec<&str> = report
        .lines()
        .filter_map(|line| line.split('\t').next())
        .filter(|label| !label.is_empty())
        .collect();
    assert_eq!(
        labels,
        ["A_sx", "A_sy", "A_s11", "A_s22", "Sxx", "Syy", "SF_xx+", "SF_xx-", "SF_yy+", "SF_yy-"]
    );
}

#[test]
fn malformed_format_aborts_after_heading() {
    let properties = SectionProperties {
        area: Some(1.0),
        j: Some(2.0),
        ..SectionProperties::new()
    };
    let mut out = Vec::new();
    let error =
        write_results(&mut out, &properties, ".3d").expect_err("'d' is not a float format");
    assert!(matches!(error, ReportError::Format(FormatSpecError::UnknownType('d'))));
    assert_eq!(String::from_utf8_lossy(&out), "Section Properties:\n");
}

#[test]
fn report_is_idempotent() {
    let properties = SectionProperties {
        area: Some(3.0e3),
        ic: Some((1.0e6, 2.0e6, -3.5e4)),
        z: Some((1.0e4, 1.2e4, 2.0e4, 2.4e4)),
        gamma: Some(7.7e9),
        ..SectionProperties::new()
    };
    let first = render_results(&properties, "12.4e").expect("report renders");
    let second = render_results(&properties, "12.4e").expect("report renders");
    assert_eq!(first, second);
    assert!(first.contains("Ixy_c\t =  -3.5000e+04\n"));
}

#[test]
fn loads_results_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temporary file");
    write!(file, r#"{{ "area": 5000.0, "rc": [40.0, 20.0] }}"#).expect("write results");

    let properties = SectionProperties::from_path(file.path()).expect("results load");
    let report = render_results(&properties, ".1f").expect("report renders");
    assert_eq!(
        report,
        "Section Properties:\nArea\t = 5000.0\nrx\t = 40.0\nry\t = 20.0\n\n"
    );
}

/// Writer that rejects every write.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn elastic_shear_centre_without_trefftz_values_stops_at_x_st() {
    let properties = SectionProperties {
        sc_e: Some((0.5, 0.25)),
        a_s: Some((1.0, 2.0)),
        ..SectionProperties::new()
    };
    let mut out = Vec::new();
    let error = write_results(&mut out, &properties, ".2f").expect_err("x_st is missing");
    assert!(matches!(error, ReportError::MissingValue { label: "x_st" }));
    assert_eq!(String::from_utf8_lossy(&out), "x_se\t = 0.50\ny_se\t = 0.25\n");
}

#[test]
fn write_failures_surface_as_io_errors() {
    let error = write_results(&mut ClosedPipe, &section(1.0), ".1f").expect_err("writes fail");
    match error {
        ReportError::Io(source) => assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("expected an I/O error, got {other:?}"),
    }

    let error = write_results(&mut ClosedPipe, &SectionProperties::new(), ".1f")
        .expect_err("the trailing blank line fails too");
    assert!(matches!(error, ReportError::Io(_)));
}

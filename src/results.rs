//! Access to computed cross-section properties.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::LoadError;

/// Read-only provider of computed section properties.
///
/// Each accessor returns `None` while its group has not been computed. Groups
/// are independent: a present centroid says nothing about whether the torsion
/// constant is available. Every accessor defaults to `None`, so an analysis
/// engine only overrides what it actually produces.
pub trait ResultsSource {
    /// Cross-sectional area `A`.
    fn area(&self) -> Option<f64> {
        None
    }
    /// First moments of area `(Qx, Qy)`.
    fn first_moments(&self) -> Option<(f64, f64)> {
        None
    }
    /// Elastic centroid `(cx, cy)`.
    fn centroid(&self) -> Option<(f64, f64)> {
        None
    }
    /// Second moments about the global axes `(Ixx_g, Iyy_g, Ixy_g)`.
    fn global_second_moments(&self) -> Option<(f64, f64, f64)> {
        None
    }
    /// Second moments about the centroidal axes `(Ixx_c, Iyy_c, Ixy_c)`.
    fn centroidal_second_moments(&self) -> Option<(f64, f64, f64)> {
        None
    }
    /// Elastic section moduli `(Zxx+, Zxx-, Zyy+, Zyy-)`.
    fn section_moduli(&self) -> Option<(f64, f64, f64, f64)> {
        None
    }
    /// Radii of gyration `(rx, ry)`.
    fn radii_of_gyration(&self) -> Option<(f64, f64)> {
        None
    }
    /// Principal axis angle `phi` in degrees.
    fn principal_angle(&self) -> Option<f64> {
        None
    }
    /// Principal second moments `(I11_c, I22_c)`.
    fn principal_second_moments(&self) -> Option<(f64, f64)> {
        None
    }
    /// Principal elastic section moduli `(Z11+, Z11-, Z22+, Z22-)`.
    fn principal_section_moduli(&self) -> Option<(f64, f64, f64, f64)> {
        None
    }
    /// Principal radii of gyration `(r11, r22)`.
    fn principal_radii_of_gyration(&self) -> Option<(f64, f64)> {
        None
    }
    /// St. Venant torsion constant `J`.
    fn torsion_constant(&self) -> Option<f64> {
        None
    }
    /// Warping constant `Iw`.
    fn warping_constant(&self) -> Option<f64> {
        None
    }
    /// Shear centre from elasticity theory `(x_se, y_se)`.
    fn elastic_shear_centre(&self) -> Option<(f64, f64)> {
        None
    }
    /// Shear centre from Trefftz's definition `(x_st, y_st)`.
    fn trefftz_shear_centre(&self) -> Option<(f64, f64)> {
        None
    }
    /// Elastic shear centre in the principal frame `(x1_se, y2_se)`.
    fn principal_shear_centre(&self) -> Option<(f64, f64)> {
        None
    }
    /// Shear areas about the global axes `(A_sx, A_sy)`.
    fn shear_areas(&self) -> Option<(f64, f64)> {
        None
    }
    /// Shear areas about the principal axes `(A_s11, A_s22)`.
    fn principal_shear_areas(&self) -> Option<(f64, f64)> {
        None
    }
    /// Plastic centroid `(x_pc, y_pc)`.
    fn plastic_centroid(&self) -> Option<(f64, f64)> {
        None
    }
    /// Plastic section moduli `(Sxx, Syy)`.
    fn plastic_moduli(&self) -> Option<(f64, f64)> {
        None
    }
    /// Shape factors `(SF_xx+, SF_xx-, SF_yy+, SF_yy-)`.
    fn shape_factors(&self) -> Option<(f64, f64, f64, f64)> {
        None
    }
    /// Plastic centroid in the principal frame `(x1_pc, y2_pc)`.
    fn principal_plastic_centroid(&self) -> Option<(f64, f64)> {
        None
    }
    /// Principal plastic section moduli `(S11, S22)`.
    fn principal_plastic_moduli(&self) -> Option<(f64, f64)> {
        None
    }
    /// Principal shape factors `(SF_11+, SF_11-, SF_22+, SF_22-)`.
    fn principal_shape_factors(&self) -> Option<(f64, f64, f64, f64)> {
        None
    }
}

/// Section properties produced by an analysis engine.
///
/// Every field is optional and missing JSON fields deserialize as "not
/// computed".
///
/// # Examples
///
/// ```
/// use sectionx::{ResultsSource, SectionProperties};
///
/// let properties = SectionProperties::from_json(r#"{ "area": 200.0, "j": 1.5e3 }"#)
///     .expect("valid document");
/// assert_eq!(properties.area(), Some(200.0));
/// assert_eq!(properties.centroid(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionProperties {
    /// Cross-sectional area.
    pub area: Option<f64>,
    /// First moments of area `(Qx, Qy)`.
    pub q: Option<(f64, f64)>,
    /// Elastic centroid `(cx, cy)`.
    pub c: Option<(f64, f64)>,
    /// Global second moments `(Ixx_g, Iyy_g, Ixy_g)`.
    pub ig: Option<(f64, f64, f64)>,
    /// Centroidal second moments `(Ixx_c, Iyy_c, Ixy_c)`.
    pub ic: Option<(f64, f64, f64)>,
    /// Elastic section moduli `(Zxx+, Zxx-, Zyy+, Zyy-)`.
    pub z: Option<(f64, f64, f64, f64)>,
    /// Radii of gyration `(rx, ry)`.
    pub rc: Option<(f64, f64)>,
    /// Principal axis angle in degrees.
    pub phi: Option<f64>,
    /// Principal second moments `(I11_c, I22_c)`.
    pub ip: Option<(f64, f64)>,
    /// Principal elastic section moduli `(Z11+, Z11-, Z22+, Z22-)`.
    pub zp: Option<(f64, f64, f64, f64)>,
    /// Principal radii of gyration `(r11, r22)`.
    pub rp: Option<(f64, f64)>,
    /// Torsion constant.
    pub j: Option<f64>,
    /// Warping constant.
    pub gamma: Option<f64>,
    /// Elastic shear centre `(x_se, y_se)`.
    pub sc_e: Option<(f64, f64)>,
    /// Trefftz shear centre `(x_st, y_st)`.
    pub sc_t: Option<(f64, f64)>,
    /// Principal elastic shear centre `(x1_se, y2_se)`.
    pub sc_p_e: Option<(f64, f64)>,
    /// Global shear areas `(A_sx, A_sy)`.
    pub a_s: Option<(f64, f64)>,
    /// Principal shear areas `(A_s11, A_s22)`.
    pub a_s_p: Option<(f64, f64)>,
    /// Plastic centroid `(x_pc, y_pc)`.
    pub pc: Option<(f64, f64)>,
    /// Plastic section moduli `(Sxx, Syy)`.
    pub s: Option<(f64, f64)>,
    /// Shape factors `(SF_xx+, SF_xx-, SF_yy+, SF_yy-)`.
    pub sf: Option<(f64, f64, f64, f64)>,
    /// Principal plastic centroid `(x1_pc, y2_pc)`.
    pub pc_p: Option<(f64, f64)>,
    /// Principal plastic section moduli `(S11, S22)`.
    pub sp: Option<(f64, f64)>,
    /// Principal shape factors `(SF_11+, SF_11-, SF_22+, SF_22-)`.
    pub sf_p: Option<(f64, f64, f64, f64)>,
}

impl SectionProperties {
    /// Create a record in which nothing has been computed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ResultsSource for SectionProperties {
    fn area(&self) -> Option<f64> {
        self.area
    }
    fn first_moments(&self) -> Option<(f64, f64)> {
        self.q
    }
    fn centroid(&self) -> Option<(f64, f64)> {
        self.c
    }
    fn global_second_moments(&self) -> Option<(f64, f64, f64)> {
        self.ig
    }
    fn centroidal_second_moments(&self) -> Option<(f64, f64, f64)> {
        self.ic
    }
    fn section_moduli(&self) -> Option<(f64, f64, f64, f64)> {
        self.z
    }
    fn radii_of_gyration(&self) -> Option<(f64, f64)> {
        self.rc
    }
    fn principal_angle(&self) -> Option<f64> {
        self.phi
    }
    fn principal_second_moments(&self) -> Option<(f64, f64)> {
        self.ip
    }
    fn principal_section_moduli(&self) -> Option<(f64, f64, f64, f64)> {
        self.zp
    }
    fn principal_radii_of_gyration(&self) -> Option<(f64, f64)> {
        self.rp
    }
    fn torsion_constant(&self) -> Option<f64> {
        self.j
    }
    fn warping_constant(&self) -> Option<f64> {
        self.gamma
    }
    fn elastic_shear_centre(&self) -> Option<(f64, f64)> {
        self.sc_e
    }
    fn trefftz_shear_centre(&self) -> Option<(f64, f64)> {
        self.sc_t
    }
    fn principal_shear_centre(&self) -> Option<(f64, f64)> {
        self.sc_p_e
    }
    fn shear_areas(&self) -> Option<(f64, f64)> {
        self.a_s
    }
    fn principal_shear_areas(&self) -> Option<(f64, f64)> {
        self.a_s_p
    }
    fn plastic_centroid(&self) -> Option<(f64, f64)> {
        self.pc
    }
    fn plastic_moduli(&self) -> Option<(f64, f64)> {
        self.s
    }
    fn shape_factors(&self) -> Option<(f64, f64, f64, f64)> {
        self.sf
    }
    fn principal_plastic_centroid(&self) -> Option<(f64, f64)> {
        self.pc_p
    }
    fn principal_plastic_moduli(&self) -> Option<(f64, f64)> {
        self.sp
    }
    fn principal_shape_factors(&self) -> Option<(f64, f64, f64, f64)> {
        self.sf_p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_not_computed() {
        let properties = SectionProperties::from_json(r#"{ "c": [1.5, 2.5] }"#)
            .expect("partial document parses");
        assert_eq!(properties.centroid(), Some((1.5, 2.5)));
        assert_eq!(properties.area(), None);
        assert_eq!(properties.principal_angle(), None);
    }

    #[test]
    fn explicit_null_is_not_computed() {
        let properties = SectionProperties::from_json(r#"{ "area": null, "j": 12.0 }"#)
            .expect("document parses");
        assert_eq!(properties.area(), None);
        assert_eq!(properties.torsion_constant(), Some(12.0));
    }

    #[test]
    fn survives_json_round_trip() {
        let properties = SectionProperties {
            area: Some(100.0),
            z: Some((1.0, 2.0, 3.0, 4.0)),
            ..SectionProperties::new()
        };
        let json = properties.to_json().expect("serializes");
        let parsed = SectionProperties::from_json(&json).expect("parses back");
        assert_eq!(parsed, properties);
    }

    #[test]
    fn rejects_malformed_documents() {
        let error = SectionProperties::from_json(r#"{ "area": "large" }"#)
            .expect_err("strings are not numbers");
        assert!(matches!(error, LoadError::Json(_)));
    }
}

use crate::error;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::str::FromStr;

/// Well-known ids at or above this value are assigned by Esri, below it by EPSG.
const ESRI_WKID_THRESHOLD: u32 = 32768;

/// The authority that assigned the code of a [`SpatialReference`]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpatialReferenceAuthority {
    Epsg,
    Esri,
}

impl std::fmt::Display for SpatialReferenceAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpatialReferenceAuthority::Epsg => "EPSG",
            SpatialReferenceAuthority::Esri => "ESRI",
        })
    }
}

impl FromStr for SpatialReferenceAuthority {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EPSG" => Ok(SpatialReferenceAuthority::Epsg),
            "ESRI" => Ok(SpatialReferenceAuthority::Esri),
            _ => Err(error::Error::InvalidSpatialReferenceString {
                spatial_reference_string: s.into(),
            }),
        }
    }
}

/// A coordinate reference system, identified by an authority and a code.
///
/// Serialized as `AUTHORITY:CODE`, e.g. `EPSG:4326`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpatialReference {
    authority: SpatialReferenceAuthority,
    code: u32,
}

impl SpatialReference {
    pub fn new(authority: SpatialReferenceAuthority, code: u32) -> Self {
        Self { authority, code }
    }

    /// the WGS 84 spatial reference system
    pub fn epsg_4326() -> Self {
        Self::new(SpatialReferenceAuthority::Epsg, 4326)
    }

    /// Web Mercator as used by most ArcGIS Online basemaps
    pub fn epsg_3857() -> Self {
        Self::new(SpatialReferenceAuthority::Epsg, 3857)
    }

    /// Classifies an ArcGIS well-known id by the range it was assigned from.
    pub fn from_wkid(wkid: u32) -> Self {
        let authority = if wkid < ESRI_WKID_THRESHOLD {
            SpatialReferenceAuthority::Epsg
        } else {
            SpatialReferenceAuthority::Esri
        };
        Self::new(authority, wkid)
    }

    pub fn authority(&self) -> SpatialReferenceAuthority {
        self.authority
    }

    pub fn code(&self) -> u32 {
        self.code
    }
}

impl std::fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl FromStr for SpatialReference {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((authority, code)) if !code.contains(':') => Ok(Self::new(
                authority.parse()?,
                code.parse::<u32>().context(error::ParseU32)?,
            )),
            _ => Err(error::Error::InvalidSpatialReferenceString {
                spatial_reference_string: s.into(),
            }),
        }
    }
}

impl TryFrom<String> for SpatialReference {
    type Error = error::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpatialReference> for String {
    fn from(spatial_reference: SpatialReference) -> Self {
        spatial_reference.to_string()
    }
}

/// A spatial reference that may be missing.
///
/// Serialized as `AUTHORITY:CODE` or as the empty string when unreferenced.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpatialReferenceOption {
    SpatialReference(SpatialReference),
    Unreferenced,
}

impl SpatialReferenceOption {
    pub fn is_unreferenced(&self) -> bool {
        matches!(self, SpatialReferenceOption::Unreferenced)
    }
}

impl std::fmt::Display for SpatialReferenceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpatialReferenceOption::SpatialReference(p) => write!(f, "{p}"),
            SpatialReferenceOption::Unreferenced => Ok(()),
        }
    }
}

impl From<SpatialReference> for SpatialReferenceOption {
    fn from(spatial_reference: SpatialReference) -> Self {
        Self::SpatialReference(spatial_reference)
    }
}

impl From<Option<SpatialReference>> for SpatialReferenceOption {
    fn from(option: Option<SpatialReference>) -> Self {
        option.map_or(SpatialReferenceOption::Unreferenced, Into::into)
    }
}

impl From<SpatialReferenceOption> for Option<SpatialReference> {
    fn from(option: SpatialReferenceOption) -> Self {
        match option {
            SpatialReferenceOption::SpatialReference(p) => Some(p),
            SpatialReferenceOption::Unreferenced => None,
        }
    }
}

impl TryFrom<String> for SpatialReferenceOption {
    type Error = error::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(SpatialReferenceOption::Unreferenced);
        }
        Ok(value.parse::<SpatialReference>()?.into())
    }
}

impl From<SpatialReferenceOption> for String {
    fn from(option: SpatialReferenceOption) -> Self {
        option.to_string()
    }
}

/// The `spatialReference` object of an ArcGIS REST response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsriSpatialReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_wkid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt: Option<String>,
}

impl From<&EsriSpatialReference> for SpatialReferenceOption {
    /// `latestWkid` wins over `wkid`, since the former is the current EPSG code
    /// for systems that Esri defined before EPSG did.
    fn from(esri: &EsriSpatialReference) -> Self {
        esri.latest_wkid
            .or(esri.wkid)
            .map(SpatialReference::from_wkid)
            .into()
    }
}

/// Returns `x` unless it is unreferenced, then `y` unless that is unreferenced too.
///
/// If both are missing the result is `x`, i.e. [`SpatialReferenceOption::Unreferenced`].
pub fn coalesce_crs(x: SpatialReferenceOption, y: SpatialReferenceOption) -> SpatialReferenceOption {
    match (x, y) {
        (SpatialReferenceOption::Unreferenced, SpatialReferenceOption::SpatialReference(_)) => y,
        _ => x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn esri_102100() -> SpatialReference {
        SpatialReference::new(SpatialReferenceAuthority::Esri, 102_100)
    }

    #[test]
    fn display() {
        assert_eq!(SpatialReferenceAuthority::Epsg.to_string(), "EPSG");
        assert_eq!(SpatialReferenceAuthority::Esri.to_string(), "ESRI");

        assert_eq!(SpatialReference::epsg_4326().to_string(), "EPSG:4326");
        assert_eq!(esri_102100().to_string(), "ESRI:102100");
        assert_eq!(SpatialReferenceOption::Unreferenced.to_string(), "");
    }

    #[test]
    fn parse() {
        assert_eq!(
            "EPSG:3857".parse::<SpatialReference>().unwrap(),
            SpatialReference::epsg_3857()
        );
        assert!("EPSG".parse::<SpatialReference>().is_err());
        assert!("EPSG:3857:1".parse::<SpatialReference>().is_err());
        assert!("FOO:1".parse::<SpatialReference>().is_err());
        assert!("EPSG:x".parse::<SpatialReference>().is_err());
    }

    #[test]
    fn serde_strings() {
        assert_eq!(
            serde_json::to_string(&SpatialReference::epsg_4326()).unwrap(),
            "\"EPSG:4326\""
        );
        assert_eq!(
            serde_json::from_str::<SpatialReference>("\"ESRI:102100\"").unwrap(),
            esri_102100()
        );
        assert!(serde_json::from_str::<SpatialReference>("\"foo:bar\"").is_err());

        assert_eq!(
            serde_json::to_string(&SpatialReferenceOption::Unreferenced).unwrap(),
            "\"\""
        );
        assert_eq!(
            serde_json::from_str::<SpatialReferenceOption>("\"\"").unwrap(),
            SpatialReferenceOption::Unreferenced
        );
        assert_eq!(
            serde_json::from_str::<SpatialReferenceOption>("\"EPSG:4326\"").unwrap(),
            SpatialReference::epsg_4326().into()
        );
    }

    #[test]
    fn from_esri_spatial_reference() {
        let web_mercator: EsriSpatialReference =
            serde_json::from_str(r#"{"wkid": 102100, "latestWkid": 3857}"#).unwrap();
        assert_eq!(
            SpatialReferenceOption::from(&web_mercator),
            SpatialReference::epsg_3857().into()
        );

        let esri_only: EsriSpatialReference = serde_json::from_str(r#"{"wkid": 102100}"#).unwrap();
        assert_eq!(
            SpatialReferenceOption::from(&esri_only),
            esri_102100().into()
        );

        let wkt_only: EsriSpatialReference =
            serde_json::from_str(r#"{"wkt": "LOCAL_CS[\"x\"]"}"#).unwrap();
        assert!(SpatialReferenceOption::from(&wkt_only).is_unreferenced());
    }

    #[test]
    fn coalesce() {
        let a: SpatialReferenceOption = SpatialReference::epsg_4326().into();
        let b: SpatialReferenceOption = esri_102100().into();
        let missing = SpatialReferenceOption::Unreferenced;

        assert_eq!(coalesce_crs(missing, missing), missing);
        assert_eq!(coalesce_crs(a, missing), a);
        assert_eq!(coalesce_crs(missing, b), b);
        assert_eq!(coalesce_crs(a, b), a);
    }
}

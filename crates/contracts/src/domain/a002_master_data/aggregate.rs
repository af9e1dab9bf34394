use crate::shared::lenient;
use serde::{Deserialize, Serialize};

/// Catalog attributes attached to a WSN. Read-only on the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MasterDataFields {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub fsn: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub product_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub mrp: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub fsp: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub hsn_sac: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub igst_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cms_vertical: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub fkt_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub wid: Option<String>,
}

impl MasterDataFields {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Display value of a master-data column by key. Unknown keys yield `None`.
    pub fn field_text(&self, key: &str) -> Option<String> {
        let num = |v: Option<f64>| v.map(format_amount);
        match key {
            "fsn" => self.fsn.clone(),
            "product_title" => self.product_title.clone(),
            "brand" => self.brand.clone(),
            "mrp" => num(self.mrp),
            "fsp" => num(self.fsp),
            "hsn_sac" => self.hsn_sac.clone(),
            "igst_rate" => num(self.igst_rate),
            "cms_vertical" => self.cms_vertical.clone(),
            "fkt_link" => self.fkt_link.clone(),
            "wid" => self.wid.clone(),
            _ => None,
        }
    }
}

/// Column keys owned by master data, in catalog order.
pub const MASTER_DATA_KEYS: [&str; 10] = [
    "fsn",
    "product_title",
    "brand",
    "mrp",
    "fsp",
    "hsn_sac",
    "igst_rate",
    "cms_vertical",
    "fkt_link",
    "wid",
];

fn format_amount(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

/// Master data record as returned by `GET /inbound/master-data/{wsn}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasterDataRecord {
    pub wsn: String,
    #[serde(flatten)]
    pub fields: MasterDataFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_types() {
        let json = r#"{
            "wsn": "WSN001",
            "fsn": "FSN9",
            "product_title": "Kettle 1.5L",
            "brand": "Acme",
            "mrp": "1299.00",
            "fsp": 999,
            "hsn_sac": 85161000,
            "igst_rate": "18",
            "cms_vertical": "",
            "wid": 7
        }"#;
        let r: MasterDataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.wsn, "WSN001");
        assert_eq!(r.fields.mrp, Some(1299.0));
        assert_eq!(r.fields.fsp, Some(999.0));
        assert_eq!(r.fields.hsn_sac.as_deref(), Some("85161000"));
        assert_eq!(r.fields.cms_vertical, None);
        assert_eq!(r.fields.fkt_link, None);
        assert_eq!(r.fields.wid.as_deref(), Some("7"));
    }

    #[test]
    fn test_field_text() {
        let f = MasterDataFields {
            mrp: Some(1299.0),
            fsp: Some(999.5),
            brand: Some("Acme".into()),
            ..Default::default()
        };
        assert_eq!(f.field_text("mrp").as_deref(), Some("1299"));
        assert_eq!(f.field_text("fsp").as_deref(), Some("999.50"));
        assert_eq!(f.field_text("brand").as_deref(), Some("Acme"));
        assert_eq!(f.field_text("wsn"), None);
        assert!(!f.is_empty());
        assert!(MasterDataFields::default().is_empty());
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogObjectType {
    Modifier,
    ModifierList,
    Other,
}

impl std::fmt::Display for CatalogObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogObjectType::Modifier => write!(f, "MODIFIER"),
            CatalogObjectType::ModifierList => write!(f, "MODIFIER_LIST"),
            CatalogObjectType::Other => write!(f, "OTHER"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierData {
    pub name: Option<String>,
    pub modifier_list_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierListData {
    pub name: Option<String>,
    /// Child modifier ids, in list order
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogData {
    Modifier(ModifierData),
    ModifierList(ModifierListData),
    /// Any other object type (items, taxes, ...) or a payload we can't read
    Other(String),
}

/// A versioned catalog definition record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCatalogObject")]
pub struct CatalogObject {
    pub id: String,
    pub version: Option<i64>,
    pub data: CatalogData,
}

impl CatalogObject {
    pub fn modifier(id: &str, version: i64, name: &str, modifier_list_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            version: Some(version),
            data: CatalogData::Modifier(ModifierData {
                name: Some(name.to_string()),
                modifier_list_id: modifier_list_id.map(str::to_string),
            }),
        }
    }

    pub fn modifier_list(id: &str, version: i64, name: &str, modifiers: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            version: Some(version),
            data: CatalogData::ModifierList(ModifierListData {
                name: Some(name.to_string()),
                modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            }),
        }
    }

    pub fn object_type(&self) -> CatalogObjectType {
        match self.data {
            CatalogData::Modifier(_) => CatalogObjectType::Modifier,
            CatalogData::ModifierList(_) => CatalogObjectType::ModifierList,
            CatalogData::Other(_) => CatalogObjectType::Other,
        }
    }

    pub fn modifier_data(&self) -> Option<&ModifierData> {
        match self.data {
            CatalogData::Modifier(ref data) => Some(data),
            _ => None,
        }
    }

    pub fn modifier_list_data(&self) -> Option<&ModifierListData> {
        match self.data {
            CatalogData::ModifierList(ref data) => Some(data),
            _ => None,
        }
    }

    /// The modifier-list this modifier belongs to, if it declares a non-empty one
    pub fn modifier_list_id(&self) -> Option<&str> {
        self.modifier_data()
            .and_then(|d| d.modifier_list_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

// Wire shape - internal only, converted into CatalogObject on deserialize

#[derive(Debug, Deserialize)]
struct RawCatalogObject {
    #[serde(rename = "type", default)]
    object_type: String,
    #[serde(default)]
    id: String,
    version: Option<i64>,
    modifier_data: Option<RawModifierData>,
    modifier_list_data: Option<RawModifierListData>,
}

#[derive(Debug, Deserialize)]
struct RawModifierData {
    name: Option<String>,
    modifier_list_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawModifierListData {
    name: Option<String>,
    #[serde(default)]
    modifiers: Vec<RawChildModifier>,
}

/// Children arrive either as bare ids or as nested catalog objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChildModifier {
    Id(String),
    Object { id: String },
}

impl From<RawCatalogObject> for CatalogObject {
    fn from(raw: RawCatalogObject) -> Self {
        let data = match (raw.modifier_data, raw.modifier_list_data) {
            (Some(m), _) if raw.object_type != "MODIFIER_LIST" => CatalogData::Modifier(ModifierData {
                name: m.name,
                modifier_list_id: m.modifier_list_id,
            }),
            (_, Some(l)) => CatalogData::ModifierList(ModifierListData {
                name: l.name,
                modifiers: l
                    .modifiers
                    .into_iter()
                    .map(|child| match child {
                        RawChildModifier::Id(id) | RawChildModifier::Object { id } => id,
                    })
                    .collect(),
            }),
            _ => CatalogData::Other(raw.object_type),
        };

        Self {
            id: raw.id,
            version: raw.version,
            data,
        }
    }
}

use std::{fmt, ops::Deref};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

macro_rules! text_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

text_newtype!(ActivityName);
text_newtype!(Email);

/// One activity as served by `GET /activities`, minus its name (the name is
/// the key of the enclosing JSON object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    #[serde(default)]
    pub participants: Vec<Email>,
}

impl ActivityDetails {
    /// Capacity minus roster length. Not clamped: an overcommitted activity
    /// reports a negative number.
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: ActivityName,
    pub details: ActivityDetails,
}

impl Activity {
    pub fn spots_left(&self) -> i64 {
        self.details.spots_left()
    }
}

/// The full activity collection in server order.
///
/// The wire shape is a JSON object keyed by activity name. Entries are kept in
/// the order the server wrote them rather than re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|activity| activity.name.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn into_vec(self) -> Vec<Activity> {
        self.activities
    }
}

impl<'a> IntoIterator for &'a ActivityCatalog {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for activity in &self.activities {
            map.serialize_entry(&activity.name, &activity.details)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut activities = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, details)) =
                    access.next_entry::<ActivityName, ActivityDetails>()?
                {
                    // Later duplicates win, as with a JSON object lookup.
                    activities.retain(|existing: &Activity| existing.name != name);
                    activities.push(Activity { name, details });
                }
                Ok(ActivityCatalog { activities })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_server_order() {
        let raw = r#"{
            "Programming Class": {"description": "d", "schedule": "s", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 12, "participants": ["michael@mergington.edu"]},
            "Art Studio": {"description": "d", "schedule": "s", "max_participants": 5, "participants": []}
        }"#;

        let catalog: ActivityCatalog = serde_json::from_str(raw).expect("decode catalog");
        let names: Vec<&str> = catalog.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Programming Class", "Chess Club", "Art Studio"]);
        assert_eq!(
            catalog.get("Chess Club").expect("chess").details.participants,
            vec![Email::from("michael@mergington.edu")]
        );
    }

    #[test]
    fn spots_left_goes_negative_when_overcommitted() {
        let details = ActivityDetails {
            description: String::new(),
            schedule: String::new(),
            max_participants: 1,
            participants: vec!["a@x.io".into(), "b@x.io".into()],
        };
        assert_eq!(details.spots_left(), -1);
    }

    #[test]
    fn catalog_rejects_non_object_payload() {
        assert!(serde_json::from_str::<ActivityCatalog>("[]").is_err());
    }

    #[test]
    fn catalog_serializes_back_to_keyed_object() {
        let catalog = ActivityCatalog::new(vec![Activity {
            name: "Chess Club".into(),
            details: ActivityDetails {
                description: "Strategy".into(),
                schedule: "Fridays".into(),
                max_participants: 2,
                participants: Vec::new(),
            },
        }]);

        let value = serde_json::to_value(&catalog).expect("encode");
        assert_eq!(value["Chess Club"]["max_participants"], 2);
    }
}

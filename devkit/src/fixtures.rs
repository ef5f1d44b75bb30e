/*!
Fixtures de snapshots au format de l'exporteur de métriques

`SnapshotBuilder::new()` part d'un document complet et valide pour les deux
écrans; les méthodes chaînables modifient ou retirent des sections pour
construire les cas limites.
*/

use serde_json::{json, Map, Value};

/// Construction de documents de métriques pour les tests
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    document: Value,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    /// Document complet: Ubuntu sur AMD, 4 cœurs, 2 volumes, 2 interfaces
    pub fn new() -> Self {
        Self {
            document: json!({
                "cpu": {
                    "usage": "73.482931",
                    "temperature": "48.5",
                    "speed": "3.40 GHz",
                    "hardware": "AMD Ryzen 7 5800X",
                    "architecture": "x86_64",
                    "architecture_type": "64bit",
                    "type": "ELF",
                    "cores": {
                        "core_0": {"usage": "12%"},
                        "core_1": {"usage": "7%"},
                        "core_2": {"usage": "3%"},
                        "core_3": {"usage": "1%"}
                    }
                },
                "ram": {
                    "used": "5.1 GB",
                    "free": "10.5 GB",
                    "total": "15.6 GB",
                    "usage_percent": "33%"
                },
                "storage": [
                    {"name": "/dev/nvme0n1p2", "usage_percent": "42.7%", "used": "201G",
                     "size": "468G", "mountpoint": "/", "fstype": "ext4"},
                    {"name": "/dev/nvme0n1p1", "usage_percent": "6.1%", "used": "31M",
                     "size": "511M", "mountpoint": "/boot/efi", "fstype": "vfat"}
                ],
                "network": {
                    "eth0": {"is_up": true, "speed": "1000 Mb/s"},
                    "wlan0": {"is_up": false, "speed": "0 Mb/s"}
                },
                "os": {
                    "distribution": "Ubuntu 22.04.3 LTS",
                    "kernel_version": "6.5.0-14-generic",
                    "uptime": "1700000000.123456"
                }
            }),
        }
    }

    fn section_mut(&mut self, section: &str) -> &mut Map<String, Value> {
        let root = self
            .document
            .as_object_mut()
            .expect("fixture root is always an object");
        let entry = root
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut().expect("section was just made an object")
    }

    /// Définit un champ d'une section (`cpu`, `ram`, `os`...)
    pub fn set_field<V: Into<Value>>(mut self, section: &str, field: &str, value: V) -> Self {
        self.section_mut(section).insert(field.to_string(), value.into());
        self
    }

    /// Remplace une section entière par une valeur arbitraire
    pub fn set_section<V: Into<Value>>(mut self, section: &str, value: V) -> Self {
        if let Value::Object(ref mut root) = self.document {
            root.insert(section.to_string(), value.into());
        }
        self
    }

    /// Retire une section du document
    pub fn without(mut self, section: &str) -> Self {
        if let Value::Object(ref mut root) = self.document {
            root.remove(section);
        }
        self
    }

    /// Retire un champ d'une section
    pub fn without_field(mut self, section: &str, field: &str) -> Self {
        self.section_mut(section).remove(field);
        self
    }

    pub fn cpu_usage<S: Into<String>>(self, usage: S) -> Self {
        self.set_field("cpu", "usage", usage.into())
    }

    pub fn ram_percent<S: Into<String>>(self, percent: S) -> Self {
        self.set_field("ram", "usage_percent", percent.into())
    }

    pub fn uptime<S: Into<String>>(self, uptime: S) -> Self {
        self.set_field("os", "uptime", uptime.into())
    }

    pub fn distribution<S: Into<String>>(self, distribution: S) -> Self {
        self.set_field("os", "distribution", distribution.into())
    }

    /// Remplace `cpu.cores` par les clés données
    pub fn cores(self, keys: &[&str]) -> Self {
        let cores: Map<String, Value> = keys
            .iter()
            .map(|key| (key.to_string(), json!({})))
            .collect();
        self.set_field("cpu", "cores", Value::Object(cores))
    }

    /// Remplace la liste `network` par les interfaces données, dans l'ordre
    pub fn interfaces(self, interfaces: &[(&str, bool, &str)]) -> Self {
        let network: Map<String, Value> = interfaces
            .iter()
            .map(|(name, is_up, speed)| (name.to_string(), json!({"is_up": is_up, "speed": speed})))
            .collect();
        self.set_section("network", Value::Object(network))
    }

    /// Ajoute un volume à `storage`
    pub fn volume(mut self, name: &str, usage_percent: &str, mountpoint: &str) -> Self {
        let volume = json!({
            "name": name,
            "usage_percent": usage_percent,
            "used": "1G",
            "size": "10G",
            "mountpoint": mountpoint,
            "fstype": "ext4"
        });
        if let Some(Value::Array(volumes)) = self.document.get_mut("storage") {
            volumes.push(volume);
        } else {
            self = self.set_section("storage", Value::Array(vec![volume]));
        }
        self
    }

    pub fn build(self) -> Value {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_has_every_section() {
        let doc = SnapshotBuilder::new().build();
        for section in ["cpu", "ram", "storage", "network", "os"] {
            assert!(doc.get(section).is_some(), "missing {section}");
        }
        assert_eq!(doc["storage"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_builder_edits() {
        let doc = SnapshotBuilder::new()
            .without("ram")
            .cpu_usage("5.5")
            .cores(&["core_0", "core_1", "other"])
            .interfaces(&[("wlan0", true, "300 Mb/s"), ("eth0", false, "0")])
            .volume("/dev/sdb1", "90%", "/data")
            .build();

        assert!(doc.get("ram").is_none());
        assert_eq!(doc["cpu"]["usage"], "5.5");
        assert_eq!(doc["cpu"]["cores"].as_object().unwrap().len(), 3);
        let names: Vec<&String> = doc["network"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["wlan0", "eth0"]);
        assert_eq!(doc["storage"].as_array().unwrap().len(), 3);
    }
}

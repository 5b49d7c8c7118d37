use std::collections::HashMap;

use derive_traits::QuadsimParameters;
use log::debug;
use serde_yaml::Mapping;
use serde_yaml::Value;

use super::Override;
use super::ParameterError;

/// The sections of a parameter file, plus the overrides that are
/// applied on top of them.
#[derive(Debug, Default)]
pub struct ParameterFileContents {
    sections: HashMap<String, Value>,
    overrides: Vec<Override>,
}

fn insert_overrides(value: &mut Value, overrides: &[Override]) {
    for o in overrides.iter() {
        set_sublevel_value_by_keys(value, &o.keys, o.value.clone());
    }
}

/// Constructs a map of the form
/// key1: key2: key3: ... key_n: Value
/// If keys is empty, returns value
fn construct_sub_mapping(keys: &[String], value: Value) -> Value {
    if keys.is_empty() {
        value
    } else {
        let mut map = Mapping::default();
        map.insert(
            Value::String(keys[0].clone()),
            construct_sub_mapping(&keys[1..], value),
        );
        Value::Mapping(map)
    }
}

fn set_sublevel_value_by_keys(value: &mut Value, keys: &[String], target_value: Value) {
    if keys.is_empty() {
        *value = target_value;
        return;
    }
    if !value.is_mapping() {
        // Overriding a key below a scalar (or an empty section)
        // replaces the scalar.
        *value = Value::Mapping(Mapping::default());
    }
    if let Some(mapping) = value.as_mapping_mut() {
        match mapping.get_mut(keys[0].as_str()) {
            Some(sub_value) => set_sublevel_value_by_keys(sub_value, &keys[1..], target_value),
            None => {
                mapping.insert(
                    Value::String(keys[0].clone()),
                    construct_sub_mapping(&keys[1..], target_value),
                );
            }
        }
    }
}

impl ParameterFileContents {
    pub fn new(contents: &str) -> Result<Self, ParameterError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(contents)?;
        let sections = match value {
            Value::Null => HashMap::default(),
            Value::Mapping(mapping) => mapping
                .into_iter()
                .map(|(k, v)| match k {
                    Value::String(name) => Ok((name, v)),
                    k => Err(ParameterError::InvalidSectionName(format!("{k:?}"))),
                })
                .collect::<Result<_, _>>()?,
            _ => return Err(ParameterError::NotAMapping),
        };
        Ok(Self {
            sections,
            overrides: vec![],
        })
    }

    pub fn with_overrides(&mut self, overrides: Vec<Override>) {
        self.overrides = overrides;
    }

    pub fn get_section_names(&self) -> impl Iterator<Item = &String> {
        self.sections.keys()
    }

    fn get_overrides_for_section<'a>(
        &'a self,
        section_name: &'a str,
    ) -> impl Iterator<Item = Override> + 'a {
        self.overrides
            .iter()
            .filter(move |o| o.section == section_name)
            .cloned()
    }

    /// The parameters as they were used, including defaults of sections
    /// that were extracted but not present in the file.
    pub fn contents(&self) -> Result<String, ParameterError> {
        let mut names: Vec<_> = self.sections.keys().collect();
        names.sort();
        let mut map = Mapping::default();
        for name in names {
            map.insert(Value::String(name.clone()), self.sections[name].clone());
        }
        Ok(serde_yaml::to_string(&map)?)
    }

    pub fn extract_parameter_struct<T: QuadsimParameters>(&mut self) -> Result<T, ParameterError> {
        let section_name = T::section_name();
        let overrides: Vec<_> = self.get_overrides_for_section(section_name).collect();
        let value = match self.sections.get(section_name) {
            Some(section_value) => {
                let mut value = section_value.clone();
                insert_overrides(&mut value, &overrides);
                value
            }
            None => {
                debug!(
                    "Parameter section missing for '{}', assuming defaults",
                    section_name
                );
                let mut value = Value::Mapping(Mapping::default());
                insert_overrides(&mut value, &overrides);
                value
            }
        };
        let extracted: T =
            serde_yaml::from_value(value).map_err(|e| ParameterError::InvalidSection {
                section: section_name.into(),
                message: e.to_string(),
            })?;
        self.sections
            .insert(section_name.to_string(), serde_yaml::to_value(&extracted)?);
        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use derive_custom::quadsim_parameters;

    use super::Override;
    use super::ParameterFileContents;
    use crate::parameters::ParameterError;

    #[quadsim_parameters("x")]
    struct X {
        a: usize,
        b: usize,
    }

    #[test]
    fn extract_section() {
        let mut contents = ParameterFileContents::new("x:\n  a: 1\n  b: 2").unwrap();
        let x = contents.extract_parameter_struct::<X>().unwrap();
        assert_eq!(x.a, 1);
        assert_eq!(x.b, 2);
        assert_eq!(contents.get_section_names().count(), 1);
    }

    #[test]
    fn r#override() {
        let mut contents = ParameterFileContents::new("x:\n  a: 1\n  b: 2").unwrap();
        contents.with_overrides(vec![Override {
            section: "x".into(),
            keys: vec!["a".into()],
            value: 5.into(),
        }]);
        let x = contents.extract_parameter_struct::<X>().unwrap();
        assert_eq!(x.a, 5);
        assert_eq!(x.b, 2);
    }

    #[test]
    fn r#override_in_omitted_section() {
        let mut contents = ParameterFileContents::new("").unwrap();
        contents.with_overrides(vec![
            Override {
                section: "x".into(),
                keys: vec!["b".into()],
                value: 6.into(),
            },
            Override {
                section: "x".into(),
                keys: vec!["a".into()],
                value: 5.into(),
            },
        ]);
        let x = contents.extract_parameter_struct::<X>().unwrap();
        assert_eq!(x.a, 5);
        assert_eq!(x.b, 6);
    }

    #[test]
    fn r#override_omitted_section() {
        #[quadsim_parameters("s")]
        struct Section(i32);

        let mut contents = ParameterFileContents::new("").unwrap();
        contents.with_overrides(vec![Override {
            section: "s".into(),
            keys: vec![],
            value: 5.into(),
        }]);
        let section = contents.extract_parameter_struct::<Section>().unwrap();
        assert_eq!(section.0, 5);
    }

    #[test]
    fn r#override_omitted_field() {
        #[quadsim_parameters("y")]
        struct Y {
            #[serde(default)]
            a: usize,
            b: usize,
        }

        let mut contents = ParameterFileContents::new("y:\n  b: 2").unwrap();
        contents.with_overrides(vec![Override {
            section: "y".into(),
            keys: vec!["a".into()],
            value: 5.into(),
        }]);
        let y = contents.extract_parameter_struct::<Y>().unwrap();
        assert_eq!(y.a, 5);
        assert_eq!(y.b, 2);
    }

    #[test]
    fn missing_required_section_is_an_error() {
        let mut contents = ParameterFileContents::new("").unwrap();
        let result = contents.extract_parameter_struct::<X>();
        assert!(matches!(
            result,
            Err(ParameterError::InvalidSection { ref section, .. }) if section == "x"
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut contents = ParameterFileContents::new("x:\n  a: 1\n  b: 2\n  c: 3").unwrap();
        assert!(contents.extract_parameter_struct::<X>().is_err());
    }

    #[test]
    fn non_mapping_file_is_rejected() {
        assert!(matches!(
            ParameterFileContents::new("- 1\n- 2"),
            Err(ParameterError::NotAMapping)
        ));
        assert!(ParameterFileContents::new("x: [").is_err());
    }

    #[test]
    fn contents_include_extracted_defaults() {
        #[quadsim_parameters("z")]
        #[serde(default)]
        #[derive(Default)]
        struct Z {
            c: usize,
        }

        let mut contents = ParameterFileContents::new("x:\n  a: 1\n  b: 2").unwrap();
        contents.extract_parameter_struct::<Z>().unwrap();
        let written = contents.contents().unwrap();
        let mut reread = ParameterFileContents::new(&written).unwrap();
        assert_eq!(reread.extract_parameter_struct::<Z>().unwrap().c, 0);
        assert_eq!(reread.extract_parameter_struct::<X>().unwrap().b, 2);
    }
}

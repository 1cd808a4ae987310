use std::borrow::Cow;
use std::collections::HashMap;


/// Source of partial templates, looked up by name at render time.
pub trait PartialProvider {
    fn get(&self, name: &str) -> Option<Cow<'_, str>>;
}


/// Partials held in memory, by name.
#[derive(Clone, Default, Debug)]
pub struct StaticProvider {
    partials: HashMap<String, String>
}

impl StaticProvider {
    pub fn new() -> Self {
        StaticProvider { partials: HashMap::new() }
    }

    pub fn insert(&mut self, name: &str, text: &str) {
        self.partials.insert(name.to_owned(), text.to_owned());
    }
}

impl PartialProvider for StaticProvider {
    fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.partials.get(name).map(|text| Cow::Borrowed(text.as_str()))
    }
}

impl From<HashMap<String, String>> for StaticProvider {
    fn from(partials: HashMap<String, String>) -> Self {
        StaticProvider { partials }
    }
}

impl<K, V> FromIterator<(K, V)> for StaticProvider
where K: Into<String>, V: Into<String> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        StaticProvider {
            partials: iter.into_iter()
                .map(|(name, text)| (name.into(), text.into()))
                .collect::<_>()
        }
    }
}

// Copyright (c) 2024-present, Andrew Werner
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A list serializes as a map in ascending key order and deserializes into a
//! fresh, OS-seeded list using the comparator's `Default`.

use std::{fmt, marker::PhantomData};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{Comparator, SkipList};

impl<K, V, C, R> Serialize for SkipList<K, V, C, R>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

struct ListVisitor<K, V, C>(PhantomData<fn() -> SkipList<K, V, C>>);

impl<'de, K, V, C> Visitor<'de> for ListVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    type Value = SkipList<K, V, C>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of skiplist entries")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut list: SkipList<K, V, C> = SkipList::default();
        while let Some((key, value)) = access.next_entry()? {
            list.insert(key, value);
        }
        Ok(list)
    }
}

impl<'de, K, V, C> Deserialize<'de> for SkipList<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ListVisitor(PhantomData))
    }
}

#[cfg(test)]
mod test_serde {
    use crate::{OrdComparator, SkipList};

    #[test]
    fn test_serde() {
        let mut list: SkipList<String, u32> = SkipList::with_seed(OrdComparator, 7);
        for i in (0..10u32).rev() {
            list.insert(format!("key-{i}"), i);
        }
        let ser = serde_json::to_string(&list).expect("Failed to serialize!");
        assert!(ser.starts_with(r#"{"key-0":0,"key-1":1"#), "{ser}");
        let back: SkipList<String, u32> = serde_json::from_str(&ser).expect("Failed to deserialize!");
        back.check_integrity();
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            back.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_deserialize_duplicate_keys_keep_last() {
        let back: SkipList<String, u32> =
            serde_json::from_str(r#"{"b":1,"a":2,"b":3}"#).expect("Failed to deserialize!");
        assert_eq!(back.len(), 2);
        assert_eq!(back.get(&"b".to_owned()), Some(&3));
    }
}

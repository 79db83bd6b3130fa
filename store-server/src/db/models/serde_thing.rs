//! Serde helpers for SurrealDB Thing references
//!
//! 引用字段的反序列化同时兼容两种来源格式：
//! - JSON 字符串 "table:id" (导入数据、旧快照)
//! - SurrealDB 原生 Thing (数据库读取)
//!
//! 这是标识符规范化的唯一入口：数据离开存储层时引用已经统一为
//! Thing。序列化不做处理，走 Thing 原生格式 (真正的记录链接)。

use std::fmt;

use serde::{Deserialize, Deserializer, de};
use surrealdb::sql::Thing;

/// "table:id" 字符串解析为 Thing；没有冒号时整个字符串作为 id
fn thing_from_str(s: &str) -> Thing {
    match s.split_once(':') {
        Some((tb, id)) => Thing::from((tb.to_string(), id.to_string())),
        None => Thing::from(("".to_string(), s.to_string())),
    }
}

struct ThingVisitor;

impl<'de> de::Visitor<'de> for ThingVisitor {
    type Value = Thing;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a record id or a string like 'table:id'")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(thing_from_str(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(thing_from_str(&v))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        // 委托给 Thing 的默认反序列化 (数据库原生格式)
        Thing::deserialize(de::value::MapAccessDeserializer::new(map))
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Thing::deserialize(deserializer)
    }
}

/// Option<Thing> 字段
/// (`#[serde(deserialize_with = "serde_thing::option::deserialize")]`)
pub mod option {
    use super::*;

    struct OptionThingVisitor;

    impl<'de> de::Visitor<'de> for OptionThingVisitor {
        type Value = Option<Thing>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("null, a record id, or a string like 'table:id'")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ThingVisitor).map(Some)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            // 空字符串视同缺省
            if v.is_empty() {
                Ok(None)
            } else {
                Ok(Some(thing_from_str(v)))
            }
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            Thing::deserialize(de::value::MapAccessDeserializer::new(map)).map(Some)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Thing>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionThingVisitor)
    }
}

/// Vec<Thing> 字段
/// (`#[serde(deserialize_with = "serde_thing::vec::deserialize")]`)
pub mod vec {
    use super::*;

    struct ThingWrapper(Thing);

    impl<'de> Deserialize<'de> for ThingWrapper {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ThingVisitor).map(ThingWrapper)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Thing>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wrappers: Vec<ThingWrapper> = Vec::deserialize(deserializer)?;
        Ok(wrappers.into_iter().map(|w| w.0).collect())
    }
}

//! Translation between object metadata and `object_store` attributes.

use crate::traits::ObjectHead;
use object_store::{Attribute, AttributeValue, Attributes, GetResult, PutOptions};
use std::collections::HashMap;

pub(crate) fn put_options(content_type: &str, metadata: &HashMap<String, String>) -> PutOptions {
    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::ContentType,
        AttributeValue::from(content_type.to_string()),
    );
    for (key, value) in metadata {
        attributes.insert(
            Attribute::Metadata(key.clone().into()),
            AttributeValue::from(value.clone()),
        );
    }

    PutOptions {
        attributes,
        ..Default::default()
    }
}

pub(crate) fn object_head(result: &GetResult) -> ObjectHead {
    let mut head = ObjectHead {
        size: result.meta.size as u64,
        ..Default::default()
    };

    for (attribute, value) in result.attributes.iter() {
        match attribute {
            Attribute::ContentType => head.content_type = Some(String::from(&**value)),
            Attribute::Metadata(key) => {
                head.metadata
                    .insert(key.to_string(), String::from(&**value));
            }
            _ => {}
        }
    }

    head
}

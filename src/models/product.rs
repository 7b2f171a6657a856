//! 产品 / 模型目录
//!
//! 表单上展示的产品标签与实际调用的聊天模型一一对应

use phf::phf_ordered_map;

use crate::error::InputError;

/// 默认产品标签
pub const DEFAULT_PRODUCT: &str = "GPT-4.0";

/// (模型 ID, 说明)
type CatalogueEntry = (&'static str, &'static str);

/// 标签 -> 目录条目，按表单顺序
static PRODUCT_CATALOGUE: phf::OrderedMap<&'static str, CatalogueEntry> = phf_ordered_map! {
    "GPT-4.0" => (
        "gpt-4-turbo",
        "Recommended for technical RFPs/RFIs.",
    ),
    "Due Diligence (Fine-Tuned)" => (
        "ft:gpt-4o-2024-08-06:personal:skyhigh-due-diligence:BClhZf1W",
        "Optimized for Due Diligence and security-related questionnaires.",
    ),
};

/// 用户选择的产品
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// 表单上的显示名称
    pub label: &'static str,
    /// 传给聊天接口的模型标识
    pub model_id: &'static str,
    /// 选项说明
    pub caption: &'static str,
}

impl Product {
    /// 根据显示名称查找产品
    pub fn from_label(label: &str) -> Result<Self, InputError> {
        PRODUCT_CATALOGUE
            .get_entry(label.trim())
            .map(|(label, (model_id, caption))| Product {
                label: *label,
                model_id: *model_id,
                caption: *caption,
            })
            .ok_or_else(|| InputError::UnknownProduct {
                label: label.to_string(),
            })
    }

    /// 按表单顺序列出所有产品
    pub fn all() -> impl Iterator<Item = Product> {
        PRODUCT_CATALOGUE
            .entries()
            .map(|(label, (model_id, caption))| Product {
                label: *label,
                model_id: *model_id,
                caption: *caption,
            })
    }
}

impl Default for Product {
    fn default() -> Self {
        Product {
            label: "GPT-4.0",
            model_id: "gpt-4-turbo",
            caption: "Recommended for technical RFPs/RFIs.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_maps_model_id() {
        let product = Product::from_label("Due Diligence (Fine-Tuned)").unwrap();
        assert!(product.model_id.starts_with("ft:gpt-4o"));

        let product = Product::from_label(" GPT-4.0 ").unwrap();
        assert_eq!(product.model_id, "gpt-4-turbo");
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        assert!(matches!(
            Product::from_label("GPT-2"),
            Err(InputError::UnknownProduct { .. })
        ));
    }

    #[test]
    fn test_default_matches_catalogue() {
        assert_eq!(Product::default(), Product::from_label(DEFAULT_PRODUCT).unwrap());
        assert_eq!(Product::all().next().unwrap().label, DEFAULT_PRODUCT);
        assert_eq!(Product::all().count(), 2);
    }
}

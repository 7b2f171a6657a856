//! 回答提示词模板

use crate::models::product::Product;

/// 固定的角色 / 指令前言
const PREAMBLE: &str = "You are an expert in Skyhigh Security products, providing highly detailed technical responses for an RFP. \
Your answer should be strictly technical, sourced exclusively from official Skyhigh Security documentation. \
Focus on architecture, specifications, security features, compliance, integrations, and standards. \
Do NOT include disclaimers or mention knowledge limitations. Only provide the direct answer.";

/// 构建单个问题的提示词
///
/// `Product:` 行写入实际调用的模型 ID，而不是表单上的显示名称
pub fn build_answer_prompt(customer_name: &str, product: &Product, question: &str) -> String {
    format!(
        "{PREAMBLE}\n\n\
         Customer: {customer_name}\n\
         Product: {product}\n\
         ### Question:\n\
         {question}\n\n\
         ### Direct Answer (from official Skyhigh docs):",
        product = product.model_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context_in_order() {
        let product = Product::default();
        let prompt = build_answer_prompt("Acme", &product, "Do you support SAML?");

        let customer_at = prompt.find("Customer: Acme\n").unwrap();
        let product_at = prompt.find("Product: gpt-4-turbo\n").unwrap();
        let question_at = prompt.find("### Question:\nDo you support SAML?\n\n").unwrap();
        assert!(prompt.starts_with("You are an expert in Skyhigh Security products"));
        assert!(customer_at < product_at && product_at < question_at);
        assert!(prompt.ends_with("### Direct Answer (from official Skyhigh docs):"));
    }

    #[test]
    fn test_fine_tuned_product_sends_model_id() {
        let product = Product::from_label("Due Diligence (Fine-Tuned)").unwrap();
        let prompt = build_answer_prompt("Acme", &product, "Q");

        let line = prompt.lines().find(|l| l.starts_with("Product: ")).unwrap();
        assert_eq!(
            line,
            "Product: ft:gpt-4o-2024-08-06:personal:skyhigh-due-diligence:BClhZf1W"
        );
    }

    #[test]
    fn test_single_mode_prompt_allows_empty_customer() {
        let prompt = build_answer_prompt("", &Product::default(), "Q");
        assert!(prompt.contains("Customer: \nProduct:"));
    }
}

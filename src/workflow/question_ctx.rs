//! 问题处理上下文
//!
//! 封装"这是本次提交的第几个问题、为哪个客户、用哪个产品"这一信息

use std::fmt::Display;

use crate::models::product::Product;

/// 问题处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 问题序号（从1开始）
    pub index: usize,

    /// 本次提交的问题总数
    pub total: usize,

    /// 客户名称，单问题模式下可以为空
    pub customer_name: String,

    /// 选择的产品
    pub product: Product,
}

impl QuestionCtx {
    /// 创建新的问题上下文
    pub fn new(
        index: usize,
        total: usize,
        customer_name: impl Into<String>,
        product: Product,
    ) -> Self {
        Self {
            index,
            total,
            customer_name: customer_name.into(),
            product,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[问题 {}/{}]", self.index, self.total)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 上游配件信息Webhook客户端
pub mod part_webhook_client;

pub use part_webhook_client::{PartInfoRequest, PartWebhookClient};

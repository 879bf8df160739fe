// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};

/// 配件搜索请求数据传输对象
///
/// 五个字段全部必填；缺失字段反序列化为空串，
/// 由处理器统一校验并给出单一错误消息
#[derive(Debug, Deserialize, Serialize)]
pub struct PartsSearchRequestDto {
    /// 车牌号
    #[serde(default)]
    pub license_plate: String,
    /// 部件名
    #[serde(default)]
    pub part_name: String,
    /// 车辆类型
    #[serde(default)]
    pub car_type: String,
    /// 车型类别
    #[serde(default)]
    pub car_model_type: String,
    /// 车型
    #[serde(default)]
    pub car_model: String,
}

impl PartsSearchRequestDto {
    /// 是否所有必填字段都已提供
    pub fn is_complete(&self) -> bool {
        !self.license_plate.trim().is_empty()
            && !self.part_name.trim().is_empty()
            && !self.car_type.trim().is_empty()
            && !self.car_model_type.trim().is_empty()
            && !self.car_model.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_deserializes_as_empty() {
        let dto: PartsSearchRequestDto =
            serde_json::from_str(r#"{"license_plate": "AB123CD"}"#).unwrap();
        assert!(!dto.is_complete());
        assert_eq!(dto.part_name, "");
    }

    #[test]
    fn test_complete_request() {
        let dto: PartsSearchRequestDto = serde_json::from_str(
            r#"{
                "license_plate": "AB123CD",
                "part_name": "brake pads",
                "car_type": "BMW",
                "car_model_type": "5 G30",
                "car_model": "520d"
            }"#,
        )
        .unwrap();
        assert!(dto.is_complete());
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

mod helpers;
mod parts_search_test;
mod scrape_pipeline_test;
mod search_results_api_test;

//! # Prompt Construction
//!
//! The provider contract is a natural-language prompt, so this module
//! is the wire format. Every filter dimension must land in the text
//! deterministically: cuisine (or "anything"), the NT$ budget tier,
//! the travel mode with its three distance/time tiers and hard outer
//! limit, the meal-time context and the result cardinality. The
//! location block differs by mode — exact coordinates the provider
//! must center on, or a manual address it should resolve itself.
//!
//! Tier boundaries, walking ~70–80 m/min, riding ~15 km/h:
//!
//! | tier | minutes | walking | riding      |
//! |------|---------|---------|-------------|
//! | 1    | 1–7     | <500 m  | <1.8 km     |
//! | 2    | 8–10    | 500–800 m | 1.8–2.5 km |
//! | 3    | 11–15   | 800–1200 m | 2.5–4.0 km |

use crate::model::{
    Cuisine, LocationContext, MealTime, Picks, PriceTier, SearchFilters, TravelMode,
};

pub fn build(filters: &SearchFilters, location: &LocationContext) -> String {
    let (location_block, near_query) = location_block(location);

    let cuisine = match filters.cuisine {
        Cuisine::Any => "任何好吃的都可以".to_string(),
        other => other.label().to_string(),
    };

    format!(
        r#"{location_block}

我是個超級吃貨，我有選擇困難！請幫我找到{near_query}的餐廳。

🎯 我的願望清單:
1. 想吃類型: {cuisine} 😋
2. 💰 {price} (⚠️嚴格篩選價格)
3. {mode} (⚠️嚴格遵守時間/距離分級)
4. {time} ⏰
5. 數量要求: {count}

🛑 絕對紅線 (CRITICAL RULES):
1. 【禁止跨區推薦】：絕對不要推薦其他國家、其他縣市的店家。請確認店家地址就在我附近。如果找不到，請誠實說找不到。
2. 【Top 1 順序綁定】：你的文字報告中推薦的「第一名」店家，**必須** 是你引用的第一個 Google Maps 連結。請不要順序錯亂。
3. 【Top 1 距離優先】：你心中的「Top 1」推薦店家，**必須** 是在【第一級優先 (1-7分鐘)】範圍內的店家。不能因為某家店很好吃但很遠就排第一。
4. 【分級排序】：請優先列出符合【第一級】的店家，再來是【第二級】，最後才是【第三級】。
5. 【加上距離】：在每一家店的推薦理由中，明確寫出「距離約 xxx 公尺」或「{mode_label}約 x 分鐘」。

請列出每家店的：
- 🏠 店名 (請使用 Markdown 連結格式： [店名](Google Map連結))
- ⭐ 評分
- 📍 位置與距離 (例如：距離約 300m，{mode_label} 4分鐘)
- 💰 預估價格
- ❤️ 為什麼推薦它 (必吃特色)

語氣要求：
請用「超級活潑、可愛、充滿表情符號」的語氣！要像個貼心的美食小助手。使用大量 Emoji (🍱, 🔥, ✨, 🤤)。

技術要求(重要)：
請務必使用 Google Maps Tool 搜尋真實存在的店家，不要憑空捏造。
確保所有的超連結 (URI) 都是真實有效的 Google Maps 連結。"#,
        location_block = location_block,
        near_query = near_query,
        cuisine = cuisine,
        price = price_context(filters.price),
        mode = mode_context(filters.mode),
        time = time_context(filters.time),
        count = count_context(filters.picks),
        mode_label = filters.mode.label(),
    )
}

fn location_block(location: &LocationContext) -> (String, String) {
    match location {
        LocationContext::Manual(address) => (
            format!(
                "📍 我的位置在：『{address}』。\n請以這個地點為中心搜尋附近的餐廳。\n注意：請不要使用GPS座標，直接搜尋這個地址周邊。"
            ),
            format!("位於 {address} 附近"),
        ),
        LocationContext::Device(coords) => (
            format!(
                "📍 我的精確位置在 (緯度: {lat}, 經度: {lng})。\n請注意：搜尋時請務必使用這個座標作為中心點，不要自己亂猜一個位置。",
                lat = coords.latitude,
                lng = coords.longitude
            ),
            format!(
                "位於 (緯度:{lat}, 經度:{lng}) 附近",
                lat = coords.latitude,
                lng = coords.longitude
            ),
        ),
    }
}

fn price_context(price: PriceTier) -> &'static str {
    match price {
        PriceTier::Budget => {
            "預算極限：200元台幣以內。請找「平價」、「銅板美食」、「小吃」或 Google Maps 標示為 '$' (Inexpensive) 的店。絕對不要推薦高價餐廳。"
        }
        PriceTier::Moderate => {
            "預算範圍：200-400元台幣。尋找中價位、Google Maps 標示為 '$$' (Moderate) 的店。"
        }
        PriceTier::MidRange => "預算範圍：400-600元台幣。適合聚餐的餐廳。",
        PriceTier::HighEnd => "預算：600元以上。尋找高級餐廳、精緻料理。",
    }
}

fn mode_context(mode: TravelMode) -> String {
    match mode {
        TravelMode::Walking => "⚠️ 交通方式：步行 (Walking)。請嚴格遵守以下距離分級：\n【第一級優先 (Tier 1)】：步行 1~7 分鐘內 (約 500公尺內)。這是最完美的距離。\n【第二級接受 (Tier 2)】：步行 8~10 分鐘內 (約 500-800公尺)。\n【第三級勉強 (Tier 3)】：步行 11~15 分鐘內 (約 800-1200公尺)。\n⛔【絕對禁止】：步行超過 15分鐘 (超過 1.2公里) 的店。"
            .to_string(),
        TravelMode::Riding => "⚠️ 交通方式：騎車 (Scooter/Bike)。請嚴格遵守以下距離分級：\n【第一級優先 (Tier 1)】：騎車 1~7 分鐘內 (約 1.8公里內)。\n【第二級接受 (Tier 2)】：騎車 8~10 分鐘內 (約 1.8-2.5公里)。\n【第三級勉強 (Tier 3)】：騎車 11~15 分鐘內 (約 2.5-4.0公里)。\n⛔【絕對禁止】：騎車超過 15分鐘 (超過 4公里) 的店。"
            .to_string(),
    }
}

fn time_context(time: MealTime) -> String {
    match time {
        MealTime::Now => {
            let now = chrono::Local::now();
            format!(
                "現在時間是 {}，請務必確認餐廳「現在這個當下」是營業中的 (Open Now)。",
                now.format("%H:%M")
            )
        }
        MealTime::Morning => "時段：早餐時段 (Morning/Breakfast)。請找有賣早餐的店。".to_string(),
        MealTime::Noon => "時段：午餐時段 (Noon/Lunch)。請找適合吃午餐的店。".to_string(),
        MealTime::Evening => "時段：晚餐時段 (Evening/Dinner)。請找適合吃晚餐的店。".to_string(),
    }
}

fn count_context(picks: Picks) -> &'static str {
    match picks {
        Picks::Single => "✨ 請只推薦「1家」你認為絕對最棒、無敵好吃的店！這非常重要，我只想去一家！",
        Picks::Multiple => "✨ 請推薦「3-5家」超棒的選擇給我挑選！",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    fn device() -> LocationContext {
        LocationContext::Device(Coordinates {
            latitude: 25.0339,
            longitude: 121.5645,
        })
    }

    #[test]
    fn device_mode_pins_exact_coordinates() {
        let prompt = build(&SearchFilters::default(), &device());
        assert!(prompt.contains("緯度: 25.0339"));
        assert!(prompt.contains("經度: 121.5645"));
        assert!(prompt.contains("使用這個座標作為中心點"));
    }

    #[test]
    fn manual_mode_names_the_address_and_forbids_coordinates() {
        let prompt = build(
            &SearchFilters::default(),
            &LocationContext::Manual("台北101".into()),
        );
        assert!(prompt.contains("『台北101』"));
        assert!(prompt.contains("位於 台北101 附近"));
        assert!(prompt.contains("請不要使用GPS座標"));
        assert!(!prompt.contains("緯度"));
    }

    #[test]
    fn any_cuisine_becomes_anything_goes() {
        let prompt = build(&SearchFilters::default(), &device());
        assert!(prompt.contains("任何好吃的都可以"));

        let filters = SearchFilters {
            cuisine: Cuisine::Japanese,
            ..Default::default()
        };
        let prompt = build(&filters, &device());
        assert!(prompt.contains("想吃類型: 日式"));
    }

    #[test]
    fn each_price_tier_spells_out_its_range() {
        let expectations = [
            (PriceTier::Budget, "200元台幣以內"),
            (PriceTier::Moderate, "200-400元台幣"),
            (PriceTier::MidRange, "400-600元台幣"),
            (PriceTier::HighEnd, "600元以上"),
        ];
        for (price, needle) in expectations {
            let filters = SearchFilters {
                price,
                ..Default::default()
            };
            let prompt = build(&filters, &device());
            assert!(prompt.contains(needle), "tier {price:?}");
        }
    }

    #[test]
    fn walking_and_riding_carry_their_tier_tables() {
        let walking = build(&SearchFilters::default(), &device());
        assert!(walking.contains("約 500公尺內"));
        assert!(walking.contains("約 800-1200公尺"));
        assert!(walking.contains("超過 1.2公里"));

        let filters = SearchFilters {
            mode: TravelMode::Riding,
            ..Default::default()
        };
        let riding = build(&filters, &device());
        assert!(riding.contains("約 1.8公里內"));
        assert!(riding.contains("約 2.5-4.0公里"));
        assert!(riding.contains("超過 4公里"));
        assert!(riding.contains("騎車約 x 分鐘"));
    }

    #[test]
    fn meal_time_now_binds_the_clock() {
        let prompt = build(&SearchFilters::default(), &device());
        assert!(prompt.contains("現在時間是"));
        assert!(prompt.contains("Open Now"));
    }

    #[test]
    fn fixed_meal_times_use_their_labels() {
        let expectations = [
            (MealTime::Morning, "早餐時段"),
            (MealTime::Noon, "午餐時段"),
            (MealTime::Evening, "晚餐時段"),
        ];
        for (time, needle) in expectations {
            let filters = SearchFilters {
                time,
                ..Default::default()
            };
            let prompt = build(&filters, &device());
            assert!(prompt.contains(needle), "time {time:?}");
            assert!(!prompt.contains("現在時間是"));
        }
    }

    #[test]
    fn cardinality_is_one_or_three_to_five() {
        let single = build(&SearchFilters::default(), &device());
        assert!(single.contains("「1家」"));

        let filters = SearchFilters {
            picks: Picks::Multiple,
            ..Default::default()
        };
        let multiple = build(&filters, &device());
        assert!(multiple.contains("「3-5家」"));
    }
}

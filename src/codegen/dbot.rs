use serde::Deserialize;

use crate::error::AppError;

/// Bot configuration request. Every field is optional and falls back to the
/// documented defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BotRequest {
    pub bot_type: String,
    pub digit: u8,
    pub market: String,
    pub stake: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
}

impl Default for BotRequest {
    fn default() -> Self {
        Self {
            bot_type: "nuclear9".to_string(),
            digit: 9,
            market: "R_75".to_string(),
            stake: 1.0,
            take_profit: 12.0,
            stop_loss: 7.0,
        }
    }
}

pub fn generate(req: &BotRequest) -> Result<String, AppError> {
    if req.market.trim().is_empty() {
        return Err(AppError::Template("market is required".to_string()));
    }
    if req.digit > 9 {
        return Err(AppError::Template(format!(
            "digit {} out of range 0-9",
            req.digit
        )));
    }
    if req.stake <= 0.0 {
        return Err(AppError::Template("stake must be positive".to_string()));
    }
    let market = req.market.trim().to_ascii_uppercase();
    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xml xmlns="https://developers.google.com/blockly/xml">
  <!-- {bot_type} digit bot: digit {digit} on {market}, stake {stake} -->
  <block type="trade" x="10" y="10">
    <field name="MARKET_TYPE">digits</field>
    <field name="SYMBOL">{market}</field>
    <field name="CONTRACT_TYPE">DIGITMATCH</field>
    <field name="DURATION">1</field>
    <field name="DURATION_TYPE">t</field>
    <field name="AMOUNT">{stake}</field>
    <field name="PREDICTION">{digit}</field>
    <next>
      <block type="variables_set">
        <field name="VAR">takeProfit</field>
        <value name="VALUE">
          <block type="math_number">
            <field name="NUM">{take_profit}</field>
          </block>
        </value>
        <next>
          <block type="variables_set">
            <field name="VAR">stopLoss</field>
            <value name="VALUE">
              <block type="math_number">
                <field name="NUM">{stop_loss}</field>
              </block>
            </value>
            <next>
              <block type="trade_result_block">
                <statement name="AFTER_PURCHASE">
                  <block type="variables_set">
                    <field name="VAR">lastResult</field>
                    <value name="VALUE">
                      <block type="read_result">
                        <field name="RESULT_TYPE">profit</field>
                      </block>
                    </value>
                  </block>
                </statement>
              </block>
            </next>
          </block>
        </next>
      </block>
    </next>
  </block>
</xml>"#,
        bot_type = req.bot_type,
        digit = req.digit,
        market = market,
        stake = req.stake,
        take_profit = req.take_profit,
        stop_loss = req.stop_loss,
    ))
}

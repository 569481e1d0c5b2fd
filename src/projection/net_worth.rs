//! Net worth of each scenario arm at a given month

use serde::Serialize;

use super::appreciation::value_at;
use super::costs::MonthlySeries;
use super::investment::{lookup, SurplusSeries};
use super::sale::{SaleCalculator, SaleOutcome};
use super::RECOVERABLE_DEPOSIT_FRACTION;
use crate::scenario::{BuyVsRent, SellVsKeep};

/// Buy-vs-rent position after `month` months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyVsRentSnapshot {
    pub month: u32,
    pub asset_value: f64,
    pub loan_balance: f64,
    /// Present when selling is part of the analysis
    pub sale: Option<SaleOutcome>,
    pub buying_net_worth: f64,
    /// Down payment plus every buying cost so far
    pub buying_expenditure: f64,
    /// Deposit plus every renting cost so far
    pub renting_expenditure: f64,
    /// Savings from renting before any investment growth
    pub cumulative_savings: f64,
    pub investment_value: f64,
    /// Growth earned on invested savings
    pub market_return: f64,
    pub renting_net_worth: f64,
    /// Positive when renting comes out ahead
    pub rent_minus_buy: f64,
}

/// Sell-vs-keep position after `month` months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellVsKeepSnapshot {
    pub month: u32,
    /// Proceeds invested today (net of any rent deposit), grown to `month`
    pub sell_investment_value: f64,
    pub sell_net_worth: f64,
    /// Selling instead at `month`
    pub sale: SaleOutcome,
    pub keep_invested: f64,
    pub keep_real_cost: f64,
    pub keep_net_position: f64,
    pub keep_net_worth: f64,
    /// Positive when selling today comes out ahead
    pub sell_minus_keep: f64,
}

/// Net worth for either comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum NetWorthSnapshot {
    BuyVsRent(BuyVsRentSnapshot),
    SellVsKeep(SellVsKeepSnapshot),
}

impl NetWorthSnapshot {
    pub fn month(&self) -> u32 {
        match self {
            NetWorthSnapshot::BuyVsRent(s) => s.month,
            NetWorthSnapshot::SellVsKeep(s) => s.month,
        }
    }

    /// Net worth of the arm that holds the asset (buy, keep)
    pub fn owning_net_worth(&self) -> f64 {
        match self {
            NetWorthSnapshot::BuyVsRent(s) => s.buying_net_worth,
            NetWorthSnapshot::SellVsKeep(s) => s.keep_net_worth,
        }
    }

    /// Net worth of the arm without the asset (rent, sell)
    pub fn alternative_net_worth(&self) -> f64 {
        match self {
            NetWorthSnapshot::BuyVsRent(s) => s.renting_net_worth,
            NetWorthSnapshot::SellVsKeep(s) => s.sell_net_worth,
        }
    }

    /// Alternative minus owning; positive favours not holding the asset
    pub fn gap(&self) -> f64 {
        self.alternative_net_worth() - self.owning_net_worth()
    }
}

pub fn buy_vs_rent_at(
    scenario: &BuyVsRent,
    series: &MonthlySeries,
    investment: &[f64],
    month: u32,
) -> BuyVsRentSnapshot {
    let down_payment = scenario.down_payment();
    let deposit = scenario.renting.deposit;

    let asset_value = value_at(scenario.purchase_price, &scenario.appreciation, month);
    let loan_balance = series.loan.balance_after(month);

    let sale = scenario.selling.as_ref().map(|selling| {
        SaleCalculator {
            sale_base: scenario.purchase_price,
            cost_basis: scenario.purchase_price,
            appreciation: &scenario.appreciation,
            selling,
            loan: &series.loan,
        }
        .outcome_at(month)
    });

    let buying_net_worth = match &sale {
        Some(outcome) => outcome.net_proceeds,
        None => asset_value - loan_balance,
    };

    let buying_expenditure = down_payment + series.total_buying_cost(month);
    let renting_expenditure = deposit + series.total_renting_cost(month);
    let cumulative_savings = buying_expenditure - renting_expenditure;

    let investment_value = lookup(investment, month, down_payment - deposit);
    let recoverable_deposit = deposit * RECOVERABLE_DEPOSIT_FRACTION;
    let renting_net_worth = investment_value + recoverable_deposit;

    BuyVsRentSnapshot {
        month,
        asset_value,
        loan_balance,
        sale,
        buying_net_worth,
        buying_expenditure,
        renting_expenditure,
        cumulative_savings,
        investment_value,
        market_return: investment_value - cumulative_savings,
        renting_net_worth,
        rent_minus_buy: renting_net_worth - buying_net_worth,
    }
}

/// Proceeds of selling today, before anything is invested
pub fn sell_today(scenario: &SellVsKeep, series: &MonthlySeries) -> SaleOutcome {
    keep_arm_sale(scenario, series).outcome_at(0)
}

/// Deposit paid out of the proceeds when renting after the sale
pub fn post_sale_deposit(scenario: &SellVsKeep) -> f64 {
    scenario
        .renting_after_sale
        .as_ref()
        .map(|r| r.deposit)
        .unwrap_or(0.0)
}

pub fn sell_vs_keep_at(
    scenario: &SellVsKeep,
    series: &MonthlySeries,
    sell_proceeds: f64,
    sell_investment: &[f64],
    keep: &SurplusSeries,
    month: u32,
) -> SellVsKeepSnapshot {
    let deposit = post_sale_deposit(scenario);

    let sell_investment_value = lookup(sell_investment, month, sell_proceeds - deposit);
    let sell_net_worth = sell_investment_value + deposit * RECOVERABLE_DEPOSIT_FRACTION;

    let sale = keep_arm_sale(scenario, series).outcome_at(month);
    let keep_net_position = keep.net_position_after(month);
    let keep_net_worth = sale.net_proceeds + keep_net_position;

    SellVsKeepSnapshot {
        month,
        sell_investment_value,
        sell_net_worth,
        sale,
        keep_invested: keep.invested_after(month),
        keep_real_cost: keep.real_cost_after(month),
        keep_net_position,
        keep_net_worth,
        sell_minus_keep: sell_net_worth - keep_net_worth,
    }
}

fn keep_arm_sale<'a>(scenario: &'a SellVsKeep, series: &'a MonthlySeries) -> SaleCalculator<'a> {
    SaleCalculator {
        sale_base: scenario.current_market_value,
        cost_basis: scenario.purchase_price,
        appreciation: &scenario.appreciation,
        selling: &scenario.selling,
        loan: &series.loan,
    }
}

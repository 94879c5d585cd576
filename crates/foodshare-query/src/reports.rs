// SPDX-License-Identifier: Apache-2.0

//! Canned analytical reports. Each report is a data record mapping a
//! human-readable question to literal SQL; adding a report is a data change,
//! not new dispatch logic. Statements carry their own ORDER BY / GROUP BY;
//! the caller renders whatever comes back.

use crate::{Fetched, QueryError, QueryErrorCode};
use foodshare_store::Store;
use rusqlite::types::Value;

/// How many runtime arguments a report statement binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportArity {
    None,
    /// One city name, bound as `?1`. Historically this was a literal text
    /// substitution into the statement; binding it closes that injection
    /// hole.
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub key: &'static str,
    pub question: &'static str,
    pub sql: &'static str,
    pub arity: ReportArity,
}

const REPORTS: &[Report] = &[
    Report {
        key: "providers_and_receivers_per_city",
        question: "How many food providers and receivers are there in each city?",
        sql: "SELECT City, 'Provider' AS Type, COUNT(*) AS Count FROM Providers GROUP BY City \
              UNION ALL \
              SELECT City, 'Receiver' AS Type, COUNT(*) AS Count FROM Receivers GROUP BY City \
              ORDER BY City, Type",
        arity: ReportArity::None,
    },
    Report {
        key: "top_provider_type_by_quantity",
        question: "Which type of food provider contributes the most food?",
        sql: "SELECT p.Type AS Provider_Type, SUM(f.Quantity) AS Total_Quantity \
              FROM Food_Listings f JOIN Providers p ON f.Provider_ID = p.Provider_ID \
              GROUP BY p.Type ORDER BY Total_Quantity DESC LIMIT 1",
        arity: ReportArity::None,
    },
    Report {
        key: "provider_contacts_by_city",
        question: "What is the contact information of food providers in a specific city?",
        sql: "SELECT Name, Type, Address, Contact FROM Providers WHERE City = ?1",
        arity: ReportArity::City,
    },
    Report {
        key: "top_receiver_by_claims",
        question: "Which receivers have claimed the most food?",
        sql: "SELECT r.Name AS Receiver_Name, COUNT(c.Claim_ID) AS Total_Claims \
              FROM Claims c JOIN Receivers r ON c.Receiver_ID = r.Receiver_ID \
              GROUP BY r.Receiver_ID, r.Name \
              ORDER BY Total_Claims DESC LIMIT 1",
        arity: ReportArity::None,
    },
    Report {
        key: "total_food_quantity",
        question: "What is the total quantity of food available from all providers?",
        sql: "SELECT SUM(Quantity) AS Total_Food_Quantity FROM Food_Listings",
        arity: ReportArity::None,
    },
    Report {
        key: "city_with_most_listings",
        question: "Which city has the highest number of food listings?",
        sql: "SELECT Location AS City, COUNT(Food_ID) AS Total_Listings \
              FROM Food_Listings GROUP BY Location \
              ORDER BY Total_Listings DESC LIMIT 1",
        arity: ReportArity::None,
    },
    Report {
        key: "most_common_food_types",
        question: "What are the most commonly available food types?",
        sql: "SELECT Food_Type, COUNT(Food_ID) AS Count_Available \
              FROM Food_Listings GROUP BY Food_Type \
              ORDER BY Count_Available DESC",
        arity: ReportArity::None,
    },
    Report {
        key: "claims_per_food_item",
        question: "How many food claims have been made for each food item?",
        sql: "SELECT f.Food_Name, COUNT(c.Claim_ID) AS Total_Claims \
              FROM Claims c JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
              GROUP BY f.Food_Name ORDER BY Total_Claims DESC",
        arity: ReportArity::None,
    },
    Report {
        key: "top_providers_by_successful_claims",
        question: "Which provider has had the highest number of successful food claims?",
        sql: "SELECT p.Name AS Provider_Name, COUNT(c.Claim_ID) AS Successful_Claims \
              FROM Claims c JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
              JOIN Providers p ON f.Provider_ID = p.Provider_ID WHERE c.Status = 'Completed' \
              GROUP BY p.Provider_ID, p.Name ORDER BY Successful_Claims DESC LIMIT 10",
        arity: ReportArity::None,
    },
    Report {
        key: "claim_status_percentages",
        question: "What percentage of food claims are completed vs. pending vs. cancelled?",
        sql: "SELECT Status, COUNT(*) AS Claim_Count, \
              ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM Claims), 2) AS Percentage \
              FROM Claims GROUP BY Status",
        arity: ReportArity::None,
    },
    Report {
        key: "avg_quantity_claimed_per_receiver",
        question: "What is the average quantity of food claimed per receiver?",
        sql: "SELECT r.Name AS Receiver_Name, ROUND(AVG(f.Quantity), 2) AS Avg_Quantity_Claimed \
              FROM Claims c JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
              JOIN Receivers r ON c.Receiver_ID = r.Receiver_ID GROUP BY r.Receiver_ID, r.Name \
              ORDER BY Avg_Quantity_Claimed DESC",
        arity: ReportArity::None,
    },
    Report {
        key: "most_claimed_meal_type",
        question: "Which meal type is claimed the most?",
        sql: "SELECT f.Meal_Type, COUNT(c.Claim_ID) AS Total_Claims \
              FROM Claims c JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
              GROUP BY f.Meal_Type ORDER BY Total_Claims DESC",
        arity: ReportArity::None,
    },
    Report {
        key: "total_donated_per_provider",
        question: "What is the total quantity of food donated by each provider?",
        sql: "SELECT p.Name AS Provider_Name, SUM(f.Quantity) AS Total_Donated \
              FROM Food_Listings f JOIN Providers p ON f.Provider_ID = p.Provider_ID \
              GROUP BY p.Provider_ID, p.Name ORDER BY Total_Donated DESC",
        arity: ReportArity::None,
    },
    Report {
        key: "top_receiver_type_by_claims",
        question: "Which receiver type benefits the most from completed claims?",
        sql: "SELECT r.Type AS Receiver_Type, COUNT(c.Claim_ID) AS Total_Claims \
              FROM Claims c JOIN Receivers r ON c.Receiver_ID = r.Receiver_ID \
              WHERE c.Status = 'Completed' GROUP BY r.Type ORDER BY Total_Claims DESC",
        arity: ReportArity::None,
    },
    Report {
        key: "food_type_wastage",
        question: "Which food type contributes most to food wastage (unclaimed items)?",
        sql: "SELECT f.Food_Type, COUNT(f.Food_ID) AS Unclaimed_Listings \
              FROM Food_Listings f LEFT JOIN Claims c ON f.Food_ID = c.Food_ID \
              WHERE c.Claim_ID IS NULL GROUP BY f.Food_Type ORDER BY Unclaimed_Listings DESC",
        arity: ReportArity::None,
    },
];

/// Statement group behind the trends dashboard view.
const TRENDS: &[Report] = &[
    Report {
        key: "claim_status_distribution",
        question: "Claim status distribution",
        sql: "SELECT Status, COUNT(*) AS Count FROM Claims GROUP BY Status",
        arity: ReportArity::None,
    },
    Report {
        key: "unclaimed_listings_by_food_type",
        question: "Food type wastage",
        sql: "SELECT f.Food_Type, COUNT(f.Food_ID) AS Unclaimed_Listings \
              FROM Food_Listings f LEFT JOIN Claims c ON f.Food_ID = c.Food_ID \
              WHERE c.Claim_ID IS NULL GROUP BY f.Food_Type",
        arity: ReportArity::None,
    },
];

#[must_use]
pub fn report_catalog() -> &'static [Report] {
    REPORTS
}

#[must_use]
pub fn trend_reports() -> &'static [Report] {
    TRENDS
}

/// Resolves a key against the main catalog and the trend group.
#[must_use]
pub fn find_report(key: &str) -> Option<&'static Report> {
    REPORTS
        .iter()
        .chain(TRENDS.iter())
        .find(|r| r.key == key)
}

/// Resolves and executes a report. Same key and arguments always produce
/// the same statement; the runtime argument is bound, never spliced into
/// the statement text.
pub fn run_report(store: &Store, key: &str, city: Option<&str>) -> Result<Fetched, QueryError> {
    let report = find_report(key).ok_or_else(|| {
        QueryError::new(QueryErrorCode::Validation, format!("unknown report key: {key}"))
    })?;

    let params: Vec<Value> = match report.arity {
        ReportArity::None => Vec::new(),
        ReportArity::City => {
            let city = city.map(str::trim).filter(|c| !c.is_empty()).ok_or_else(|| {
                QueryError::new(
                    QueryErrorCode::Validation,
                    format!("report {key} requires a city argument"),
                )
            })?;
            vec![Value::Text(city.to_string())]
        }
    };

    let table = store.query(report.sql, &params)?;
    Ok(Fetched::from_table(table))
}

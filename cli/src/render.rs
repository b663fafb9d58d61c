use matriz_core::{Collaborator, PerDiemAccrual, RequestDto};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DESTINATION_WIDTH: usize = 24;

// Helper struct for Table Row
#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Collaborator")]
    collaborator: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Meals")]
    meals: String,
    #[tabled(rename = "Nights")]
    nights: String,
    #[tabled(rename = "Total")]
    total: String,
}

pub fn show_requests(dtos: Vec<RequestDto>) {
    if dtos.is_empty() {
        println!("No requests found.");
        return;
    }

    let rows: Vec<RequestRow> = dtos
        .into_iter()
        .map(|dto| RequestRow {
            id: dto.id.to_string()[..8].to_string(),
            collaborator: truncate(&dto.collaborator, DESTINATION_WIDTH),
            period: dto.period,
            destination: truncate(&dto.destination, DESTINATION_WIDTH),
            meals: format!(
                "B{} L{} D{}",
                dto.breakfasts, dto.lunches, dto.dinners
            ),
            nights: dto.overnights.to_string(),
            total: dto.total_value,
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("{}", table);
}

#[derive(Tabled)]
struct CollaboratorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Daily")]
    daily: String,
    #[tabled(rename = "Overnight")]
    overnight: String,
}

pub fn show_collaborators(collaborators: Vec<Collaborator>) {
    if collaborators.is_empty() {
        println!("No collaborators found.");
        return;
    }

    let rows: Vec<CollaboratorRow> = collaborators
        .into_iter()
        .map(|collaborator| CollaboratorRow {
            id: collaborator.id.to_string()[..8].to_string(),
            name: truncate(&collaborator.name, DESTINATION_WIDTH),
            role: collaborator.role.unwrap_or_else(|| "-".to_string()),
            daily: rate_cell(collaborator.daily_rate),
            overnight: rate_cell(collaborator.overnight_rate),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    println!("{}", table);
}

pub fn show_request_detail(dto: &RequestDto) {
    println!("Request {}", dto.id);
    println!("  Requester:    {}", dto.requester);
    println!("  Collaborator: {}", dto.collaborator);
    println!("  Period:       {}", dto.period);
    println!("  Destination:  {}", dto.destination);
    if let Some(note) = &dto.note {
        println!("  Note:         {}", note);
    }
    if let Some(cc) = &dto.cost_center {
        println!("  Cost center:  {}", cc);
    }
    println!("  Created:      {}", dto.created_at.format("%Y-%m-%d %H:%M"));
    println!(
        "  Meals:        B{} L{} D{}  ({})",
        dto.breakfasts, dto.lunches, dto.dinners, dto.meals_value
    );
    println!("  Overnights:   {}  ({})", dto.overnights, dto.overnight_value);
    println!("  Total:        {}", dto.total_value);
}

pub fn print_accrual(accrual: &PerDiemAccrual) {
    println!(
        "  Meals:      {} breakfasts, {} lunches, {} dinners ({:.2})",
        accrual.breakfasts, accrual.lunches, accrual.dinners, accrual.meals_value
    );
    println!(
        "  Overnights: {} ({:.2})",
        accrual.overnights, accrual.overnight_value
    );
    println!("  Total:      {:.2}", accrual.total_value);
}

fn rate_cell(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r > 0.0 => format!("{:.2}", r),
        _ => "-".to_string(),
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let mut truncated = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > max_width.saturating_sub(1) {
            break;
        }
        width += char_width;
        truncated.push(c);
    }
    truncated.push('…');
    truncated
}

use crate::models::Swosh;

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>swosh</title>
</head>
<body>
<h1>swosh</h1>
<p>Short links that open a prefilled Swish payment.</p>
<form id="create">
  <label>Payee <input name="payee" required placeholder="070 123 45 67"></label>
  <label>Amount <input name="amount" type="number" min="1" step="any" required></label>
  <label>Message <input name="description" maxlength="50"></label>
  <label>Expires after (seconds) <input name="expire_after_seconds" type="number" min="1"></label>
  <button type="submit">Create link</button>
</form>
<p id="result"></p>
<h2>API</h2>
<pre>POST /api/create
{"payee": "0701234567", "amount": 100, "description": "Lunch", "expire_after_seconds": 86400}</pre>
<script>
document.getElementById("create").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const body = { payee: form.get("payee"), amount: Number(form.get("amount")) };
  if (form.get("description")) body.description = form.get("description");
  if (form.get("expire_after_seconds")) body.expire_after_seconds = Number(form.get("expire_after_seconds"));
  const response = await fetch("/api/create", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify(body),
  });
  const json = await response.json();
  const result = document.getElementById("result");
  if (json.success) {
    const link = `${location.origin}/${json.data.id}`;
    result.innerHTML = `<a href="${link}/preview">${link}</a>`;
  } else {
    result.textContent = json.error.message;
  }
});
</script>
</body>
</html>
"#;

pub fn preview_html(swosh: &Swosh, payment_uri: &str, qr_svg: &str) -> String {
    let description = swosh
        .description
        .as_deref()
        .map(|d| format!("<p class=\"message\">{}</p>\n", escape(d)))
        .unwrap_or_default();
    let expiry = swosh
        .expires_at
        .map(|at| format!("<p class=\"expiry\">Valid until {}</p>\n", at.format("%Y-%m-%d %H:%M UTC")))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Pay {amount} kr to {payee}</title>
</head>
<body>
<h1>{amount} kr</h1>
<p class="payee">To {payee}</p>
{description}{expiry}<a class="open" href="{uri}">Open in Swish</a>
<div class="qr">{qr_svg}</div>
</body>
</html>
"#,
        amount = format_amount(swosh.amount),
        payee = escape(&swosh.payee),
        uri = escape(payment_uri),
    )
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewSwosh;
    use chrono::Utc;

    #[test]
    fn escapes_user_text() {
        let new = NewSwosh {
            payee: "0701234567".into(),
            amount: 99.5,
            description: Some("<script>alert(1)</script>".into()),
            expires_at: None,
        };
        let swosh = Swosh::new("zzzzzzzzzz".into(), &new, Utc::now());
        let html = preview_html(&swosh, "swish://payment?data=x", "<svg></svg>");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("99.50 kr"));
        assert!(html.contains("<svg></svg>"));
    }

    #[test]
    fn whole_amounts_have_no_decimals() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(1.25), "1.25");
    }
}

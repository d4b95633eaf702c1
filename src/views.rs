use crate::model::{Listing, SortOrder};
use crate::utils::format_millis;
use html_escape::{encode_double_quoted_attribute, encode_text};

const HTML_HEADER: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Admin Links</title>
  <style>
    :root {
      font-family: "Helvetica Neue", Arial, sans-serif;
      color: #0f172a;
      background: #f8fafc;
    }
    body { margin: 0; padding: 24px; }
    h1 { margin: 0 0 16px; font-size: 24px; }
    .card { background: #fff; border: 1px solid #e2e8f0; border-radius: 10px; padding: 16px; box-shadow: 0 8px 24px rgba(15,23,42,0.06); }
    form { display: flex; gap: 8px; align-items: center; flex-wrap: wrap; }
    input { padding: 8px 10px; border: 1px solid #cbd5e1; border-radius: 6px; min-width: 160px; }
    button { padding: 8px 12px; border: none; border-radius: 6px; background: #2563eb; color: white; cursor: pointer; }
    button.danger { background: #dc2626; }
    table { width: 100%; border-collapse: collapse; margin-top: 16px; }
    th, td { padding: 10px; border-bottom: 1px solid #e2e8f0; text-align: left; }
    th { background: #f1f5f9; }
    .flash { margin-top: 12px; padding: 10px; border-radius: 6px; background: #ecfeff; border: 1px solid #22d3ee; color: #0f172a; }
    .muted { color: #64748b; }
    .inline { display: inline-flex; gap: 6px; align-items: center; }
  </style>
</head>
<body>
"#;

const ORDER_OPTIONS: [(SortOrder, &str); 3] = [
    (SortOrder::Slug, "Name (A-Z)"),
    (SortOrder::Hits, "Hits (desc)"),
    (SortOrder::LastAccess, "Last access"),
];

pub fn render_admin_page(listing: &Listing, flash: Option<&str>, order: SortOrder) -> String {
    let order_value = order.as_str();
    let rows: String = listing
        .entries
        .iter()
        .map(|(slug, record)| {
            let slug_text = encode_text(slug);
            let slug_attr = encode_double_quoted_attribute(slug);
            let url = encode_double_quoted_attribute(&record.url);
            let last_access = record
                .last_access
                .and_then(format_millis)
                .unwrap_or_else(|| "Never".to_string());
            format!(
                r#"<tr>
        <td><a href="{url}" target="_blank" rel="noopener noreferrer"><code>{slug_text}</code></a></td>
        <td>
          <form class="inline" method="POST" action="/admin/update?order={order_value}">
            <input type="hidden" name="slug" value="{slug_attr}" />
            <input type="hidden" name="order" value="{order_value}" />
            <input name="target" value="{url}" />
            <button type="submit">Save</button>
          </form>
        </td>
        <td>{hits}</td>
        <td>{last_access}</td>
        <td>
          <form method="POST" action="/admin/delete?order={order_value}" data-slug="{slug_attr}" onsubmit="return confirm('Delete ' + this.dataset.slug + '?');">
            <input type="hidden" name="slug" value="{slug_attr}" />
            <input type="hidden" name="order" value="{order_value}" />
            <button class="danger" type="submit">Delete</button>
          </form>
        </td>
      </tr>"#,
                hits = record.hits,
            )
        })
        .collect();
    let rows = if rows.is_empty() {
        r#"<tr><td colspan="5" class="muted">No links yet</td></tr>"#.to_string()
    } else {
        rows
    };
    let flash = flash
        .filter(|message| !message.is_empty())
        .map(|message| format!(r#"<div class="flash">{}</div>"#, encode_text(message)))
        .unwrap_or_default();
    let options: String = ORDER_OPTIONS
        .iter()
        .map(|(option, label)| {
            let selected = if *option == order { " selected" } else { "" };
            format!(r#"<option value="{}"{selected}>{label}</option>"#, option.as_str())
        })
        .collect();

    format!(
        r#"{HTML_HEADER}  <div class="card">
    <h1>Link admin</h1>
    <form method="POST" action="/admin/create?order={order_value}">
      <input name="slug" placeholder="name (e.g. emol)" required />
      <input name="target" placeholder="https://destination.com" required />
      <input type="hidden" name="order" value="{order_value}" />
      <button type="submit">Create</button>
    </form>
    {flash}
    <form class="inline" method="GET" action="/admin">
      <label class="muted">Order by</label>
      <select name="order" onchange="this.form.submit()">{options}</select>
    </form>
    <table>
      <thead>
        <tr><th>Slug</th><th>Target</th><th>Hits</th><th>Last access</th><th></th></tr>
      </thead>
      <tbody>
      {rows}
      </tbody>
    </table>
    <p class="muted">Total hits: {total_hits}</p>
  </div>
</body></html>"#,
        total_hits = listing.total_hits,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkRecord;

    fn listing_with(slug: &str, url: &str, hits: u64) -> Listing {
        let mut record = LinkRecord::new(url.into(), 0);
        record.hits = hits;
        Listing {
            entries: vec![(slug.into(), record)],
            total_hits: hits,
        }
    }

    #[test]
    fn empty_listing_shows_placeholder_row() {
        let listing = Listing {
            entries: vec![],
            total_hits: 0,
        };
        let page = render_admin_page(&listing, None, SortOrder::Slug);
        assert!(page.contains("No links yet"));
        assert!(page.contains("Total hits: 0"));
        assert!(!page.contains(r#"class="flash""#));
    }

    #[test]
    fn rows_carry_order_and_escaped_values() {
        let listing = listing_with("a<b", "https://x.io/?q=\"1\"", 4);
        let page = render_admin_page(&listing, Some("Created <b>"), SortOrder::Hits);
        assert!(page.contains("<code>a&lt;b</code>"));
        assert!(page.contains("https://x.io/?q=&quot;1&quot;"));
        assert!(page.contains(r#"<div class="flash">Created &lt;b&gt;</div>"#));
        assert!(page.contains(r#"action="/admin/update?order=hits""#));
        assert!(page.contains(r#"<option value="hits" selected>"#));
        assert!(page.contains("Never"));
        assert!(page.contains("Total hits: 4"));
    }

    #[test]
    fn quoted_slug_stays_out_of_delete_script() {
        let slug = "x');alert(1);('";
        let listing = listing_with(slug, "https://x.io/", 0);
        let page = render_admin_page(&listing, None, SortOrder::Slug);
        assert!(page.contains(
            r#"data-slug="x');alert(1);('" onsubmit="return confirm('Delete ' + this.dataset.slug + '?');""#
        ));
        assert!(!page.contains("alert(1);('?"));
        let onsubmit_count = page.matches("onsubmit=").count();
        assert_eq!(onsubmit_count, 1);
    }

    #[test]
    fn double_quote_in_slug_is_attribute_encoded() {
        let listing = listing_with("a\"b", "https://x.io/", 0);
        let page = render_admin_page(&listing, None, SortOrder::Slug);
        assert!(page.contains(r#"data-slug="a&quot;b""#));
        assert!(page.contains(r#"name="slug" value="a&quot;b""#));
        assert!(page.contains("<code>a\"b</code>"));
    }
}

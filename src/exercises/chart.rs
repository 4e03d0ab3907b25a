//! Sample chart files shown in the packaging challenge

/// A file of the sample chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartFile {
    pub id: &'static str,
    /// Path relative to the chart root
    pub path: &'static str,
    pub contents: &'static str,
}

pub const CHART_FILES: &[ChartFile] = &[
    ChartFile {
        id: "chart-yaml",
        path: "Chart.yaml",
        contents: r#"apiVersion: v2
name: myapp-chart
description: A Helm chart for our Java application
type: application
version: 0.1.0
appVersion: "1.0.0""#,
    },
    ChartFile {
        id: "values-yaml",
        path: "values.yaml",
        contents: r#"replicaCount: 2

image:
  repository: your-jfrog.jfrog.io/docker-local/myapp
  tag: "1.0"
  pullPolicy: IfNotPresent

service:
  type: ClusterIP
  port: 8080

resources:
  limits:
    cpu: 500m
    memory: 512Mi
  requests:
    cpu: 250m
    memory: 256Mi

ingress:
  enabled: true
  hosts:
    - host: myapp.example.com
      paths:
        - path: /
          pathType: Prefix"#,
    },
    ChartFile {
        id: "deployment-yaml",
        path: "templates/deployment.yaml",
        contents: r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{ .Release.Name }}
spec:
  replicas: {{ .Values.replicaCount }}
  selector:
    matchLabels:
      app: {{ .Release.Name }}
  template:
    metadata:
      labels:
        app: {{ .Release.Name }}
    spec:
      containers:
        - name: {{ .Chart.Name }}
          image: "{{ .Values.image.repository }}:{{ .Values.image.tag }}"
          ports:
            - containerPort: {{ .Values.service.port }}
          resources:
            {{- toYaml .Values.resources | nindent 12 }}"#,
    },
    ChartFile {
        id: "service-yaml",
        path: "templates/service.yaml",
        contents: r#"apiVersion: v1
kind: Service
metadata:
  name: {{ .Release.Name }}
spec:
  type: {{ .Values.service.type }}
  ports:
    - port: {{ .Values.service.port }}
      targetPort: {{ .Values.service.port }}
      protocol: TCP
  selector:
    app: {{ .Release.Name }}"#,
    },
    ChartFile {
        id: "ingress-yaml",
        path: "templates/ingress.yaml",
        contents: r#"{{- if .Values.ingress.enabled -}}
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: {{ .Release.Name }}
spec:
  rules:
    {{- range .Values.ingress.hosts }}
    - host: {{ .host }}
      http:
        paths:
          {{- range .paths }}
          - path: {{ .path }}
            pathType: {{ .pathType }}
            backend:
              service:
                name: {{ $.Release.Name }}
                port:
                  number: {{ $.Values.service.port }}
          {{- end }}
    {{- end }}
{{- end }}"#,
    },
];

pub fn find(id: &str) -> Option<&'static ChartFile> {
    CHART_FILES.iter().find(|f| f.id == id)
}

/// Title and body to display for `id`; unknown ids show the raw id and a
/// not-found body
pub fn view(id: &str) -> (&str, &'static str) {
    match find(id) {
        Some(file) => (file.path, file.contents),
        None => (id, "File not found"),
    }
}
